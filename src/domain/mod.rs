pub mod board;
pub mod calendar;
pub mod equipment;
pub mod guard;
pub mod request;
pub mod sorting;
pub mod status;

pub use board::{BoardConfig, Column, ColumnColor, Lane};
pub use calendar::CalendarEvent;
pub use equipment::{Equipment, EquipmentId};
pub use guard::{Rejection, Verdict};
pub use request::{MaintenanceRequest, NewRequest, RequestFilter, RequestId, RequestType};
pub use sorting::{sort_requests, SortField, SortOrder};
pub use status::{RequestStatus, StatusValue};
