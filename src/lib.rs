//! # GearGuard Core
//!
//! Domain logic for the GearGuard maintenance dashboard: equipment, maintenance
//! requests and their lifecycle, the preventive maintenance calendar, and the
//! kanban board that moves requests through NEW → IN_PROGRESS → REPAIRED/SCRAP.
//!
//! The status transition guard in [`domain::guard`] is pure and has no
//! dependency on any UI or gesture library. Data comes from a [`DataSource`],
//! either the REST backend or an in-memory mock, chosen by configuration.

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod source;
pub mod views;

// Re-export commonly used types
pub use config::{DashboardConfig, DataSourceKind};
pub use domain::{
    board::{BoardConfig, Column},
    equipment::{Equipment, EquipmentId},
    request::{MaintenanceRequest, RequestId, RequestType},
    status::{RequestStatus, StatusValue},
};
pub use error::{GearGuardError, Result};
pub use source::DataSource;
