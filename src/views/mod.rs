//! Headless view controllers: each owns a data source and the state a
//! rendering layer needs, and nothing about how it is drawn.

pub mod calendar;
pub mod equipment;
pub mod kanban;

pub use calendar::{MaintenanceCalendar, Schedule};
pub use equipment::{EquipmentDetail, EquipmentDirectory};
pub use kanban::{ConfirmPrompt, DragEnd, DropOutcome, KanbanBoard, Notice, Severity};
