//! Kanban board controller.
//!
//! Holds the cached request list for the board and turns drag gestures into
//! status updates. Every drop is checked by the transition guard; moves into
//! SCRAP are only dispatched after the user confirms. Accepted moves are applied
//! to the cache before the server answers and rolled back if it refuses. Either
//! way the board is then refreshed from the source.

use crate::{
    domain::{
        guard::{self, Rejection, Verdict},
        BoardConfig, Lane, MaintenanceRequest, NewRequest, RequestFilter, RequestId,
        RequestStatus, StatusValue,
    },
    error::Result,
    source::DataSource,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Warning shown before a request is scrapped
pub const SCRAP_WARNING: &str = "Marking this request as SCRAP will automatically set the associated equipment as UNUSABLE. This action cannot be reversed. Are you sure?";

/// Asks the user to approve an irreversible move
#[async_trait]
pub trait ConfirmPrompt: Send + Sync {
    async fn confirm(&self, message: &str) -> bool;
}

/// A finished drag gesture, independent of any gesture library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEnd {
    /// Identifier of the dragged card
    pub card_id: String,
    /// Droppable the card was released over, if any
    pub destination: Option<String>,
}

impl DragEnd {
    pub fn new(card_id: impl Into<String>, destination: Option<&str>) -> Self {
        Self {
            card_id: card_id.into(),
            destination: destination.map(str::to_string),
        }
    }
}

/// What a drop did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// No destination, an unknown column, or an unknown card
    Cancelled,
    /// Dropped back onto its own column
    Unchanged,
    /// The guard refused the move
    Rejected(Rejection),
    /// The user did not confirm a destructive move
    Declined,
    /// The server accepted the move
    Moved {
        id: RequestId,
        from: StatusValue,
        to: RequestStatus,
    },
    /// The server refused the move; the board was reconciled
    Failed { id: RequestId, messages: Vec<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Destructive,
}

/// Toast-style message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl DropOutcome {
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::Cancelled | Self::Unchanged | Self::Declined => None,
            Self::Rejected(rejection) => Some(Notice {
                title: "Invalid transition".to_string(),
                description: rejection.to_string(),
                severity: Severity::Destructive,
            }),
            Self::Moved { to, .. } => Some(Notice {
                title: "Status updated".to_string(),
                description: format!("Request moved to {}", to),
                severity: Severity::Info,
            }),
            Self::Failed { messages, .. } => Some(Notice {
                title: "Failed to update status".to_string(),
                description: messages.join(", "),
                severity: Severity::Destructive,
            }),
        }
    }
}

pub struct KanbanBoard {
    source: Arc<dyn DataSource>,
    config: BoardConfig,
    filter: RequestFilter,
    requests: Vec<MaintenanceRequest>,
}

impl KanbanBoard {
    pub fn new(source: Arc<dyn DataSource>, config: BoardConfig) -> Self {
        Self {
            source,
            config,
            filter: RequestFilter::default(),
            requests: Vec::new(),
        }
    }

    pub fn with_filter(mut self, filter: RequestFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn requests(&self) -> &[MaintenanceRequest] {
        &self.requests
    }

    pub fn request(&self, id: RequestId) -> Option<&MaintenanceRequest> {
        self.requests.iter().find(|r| r.id == id)
    }

    pub fn lanes(&self) -> Vec<Lane<'_>> {
        self.config.lanes(&self.requests)
    }

    /// Replaces the cache with the authoritative list
    pub async fn load(&mut self) -> Result<()> {
        self.requests = self.source.list_requests(&self.filter).await?;
        tracing::debug!(count = self.requests.len(), "Loaded board requests");
        Ok(())
    }

    /// Creates a request and shows it on the board
    pub async fn create(&mut self, new_request: &NewRequest) -> Result<RequestId> {
        let created = self.source.create_request(new_request).await?;
        let id = created.id;
        self.requests.push(created);
        Ok(id)
    }

    /// Handles the end of a drag gesture.
    ///
    /// Only data-source failures that happen outside the status update itself
    /// surface as `Err`; refusals and failed updates are outcomes.
    pub async fn handle_drag_end(
        &mut self,
        drag: DragEnd,
        prompt: &dyn ConfirmPrompt,
    ) -> Result<DropOutcome> {
        let Some(target) = drag
            .destination
            .as_deref()
            .and_then(|drop_id| self.config.resolve_drop_target(drop_id))
        else {
            tracing::debug!(card = %drag.card_id, "Drop without a destination column");
            return Ok(DropOutcome::Cancelled);
        };

        let Some(id) = drag.card_id.parse::<RequestId>().ok() else {
            tracing::debug!(card = %drag.card_id, "Drop of an unrecognized card");
            return Ok(DropOutcome::Cancelled);
        };
        let Some(current) = self.request(id).map(|r| r.status.clone()) else {
            tracing::debug!(request_id = %id, "Dropped request is not on the board");
            return Ok(DropOutcome::Cancelled);
        };

        match guard::check(&current, &StatusValue::Known(target)) {
            Verdict::Unchanged => Ok(DropOutcome::Unchanged),
            Verdict::Rejected(rejection) => {
                tracing::warn!(request_id = %id, reason = %rejection, "Rejected drop");
                Ok(DropOutcome::Rejected(rejection))
            }
            Verdict::ConfirmationRequired => {
                if prompt.confirm(SCRAP_WARNING).await {
                    self.dispatch(id, current, target).await
                } else {
                    tracing::debug!(request_id = %id, "Destructive move declined");
                    Ok(DropOutcome::Declined)
                }
            }
            Verdict::Allowed => self.dispatch(id, current, target).await,
        }
    }

    async fn dispatch(
        &mut self,
        id: RequestId,
        previous: StatusValue,
        target: RequestStatus,
    ) -> Result<DropOutcome> {
        self.set_cached_status(id, StatusValue::Known(target));

        match self.source.update_request_status(id, target).await {
            Ok(()) => {
                tracing::info!(request_id = %id, from = %previous, to = %target, "Request moved");
                if let Err(reload) = self.load().await {
                    tracing::warn!(error = %reload, "Reload after successful update failed");
                    let filter = &self.filter;
                    self.requests.retain(|r| filter.matches(r));
                }
                Ok(DropOutcome::Moved {
                    id,
                    from: previous,
                    to: target,
                })
            }
            Err(err) => {
                tracing::error!(request_id = %id, error = %err, "Status update failed, rolling back");
                let messages = err.messages();

                self.set_cached_status(id, previous);
                if let Err(reload) = self.load().await {
                    tracing::warn!(error = %reload, "Reload after failed update also failed");
                }

                Ok(DropOutcome::Failed { id, messages })
            }
        }
    }

    fn set_cached_status(&mut self, id: RequestId, status: StatusValue) {
        if let Some(request) = self.requests.iter_mut().find(|r| r.id == id) {
            request.status = status;
        }
    }
}
