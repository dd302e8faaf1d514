use crate::domain::request::MaintenanceRequest;
use crate::domain::status::RequestStatus;
use serde::{Deserialize, Serialize};

/// Configuration for a kanban board column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub title: String,
    pub status: RequestStatus,
    pub color: ColumnColor,
}

/// Accent shown next to a column title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnColor {
    Blue,
    Yellow,
    Green,
    Red,
}

impl Column {
    pub fn new(status: RequestStatus, color: ColumnColor) -> Self {
        Self {
            title: status.to_string(),
            status,
            color,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Droppable identifier used by the gesture layer
    pub fn drop_id(&self) -> &'static str {
        self.status.code()
    }
}

/// Board configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub name: String,
    pub columns: Vec<Column>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            name: "Maintenance Kanban Board".to_string(),
            columns: vec![
                Column::new(RequestStatus::New, ColumnColor::Blue),
                Column::new(RequestStatus::InProgress, ColumnColor::Yellow),
                Column::new(RequestStatus::Repaired, ColumnColor::Green),
                Column::new(RequestStatus::Scrap, ColumnColor::Red),
            ],
        }
    }
}

/// One rendered column with the requests currently in it
#[derive(Debug, Clone)]
pub struct Lane<'a> {
    pub column: &'a Column,
    pub requests: Vec<&'a MaintenanceRequest>,
}

impl Lane<'_> {
    pub fn count(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

impl BoardConfig {
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.columns.is_empty() {
            return Err(crate::error::GearGuardError::ConfigError(
                "board must have at least one column".to_string(),
            ));
        }
        for (i, column) in self.columns.iter().enumerate() {
            if self.columns[..i].iter().any(|c| c.status == column.status) {
                return Err(crate::error::GearGuardError::ConfigError(format!(
                    "duplicate board column for status {}",
                    column.status.code()
                )));
            }
        }
        Ok(())
    }

    /// Gets the column configuration for a status
    pub fn get_column_for_status(&self, status: RequestStatus) -> Option<&Column> {
        self.columns.iter().find(|col| col.status == status)
    }

    /// Maps a droppable id (an exact status code) to the status of a configured column.
    /// Anything that is not a column on this board yields None.
    pub fn resolve_drop_target(&self, drop_id: &str) -> Option<RequestStatus> {
        let status = RequestStatus::from_code(drop_id)?;
        self.get_column_for_status(status).map(|col| col.status)
    }

    /// Splits requests into lanes in column order, each sorted by schedule.
    /// Requests whose status has no column are left out.
    pub fn lanes<'a>(&'a self, requests: &'a [MaintenanceRequest]) -> Vec<Lane<'a>> {
        self.columns
            .iter()
            .map(|column| {
                let mut lane: Vec<&MaintenanceRequest> = requests
                    .iter()
                    .filter(|r| r.status.is(column.status))
                    .collect();
                // Unscheduled cards sink to the bottom
                lane.sort_by_key(|r| (r.scheduled_date.is_none(), r.scheduled_date, r.id));
                Lane {
                    column,
                    requests: lane,
                }
            })
            .collect()
    }
}
