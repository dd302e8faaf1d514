//! Status transition guard.
//!
//! Decides whether a request may move from one status to another, and whether
//! the move needs explicit confirmation first. Every function here is pure; the
//! guard owns no data and never performs I/O.
//!
//! ```text
//! NEW ──> IN_PROGRESS ──> REPAIRED ──> SCRAP
//!              │                         ▲
//!              └─────────────────────────┘
//! ```

use crate::domain::status::{RequestStatus, StatusValue};
use std::fmt;

/// Outcome of checking a proposed move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Target equals the current status; skip silently
    Unchanged,
    /// Legal move that can be dispatched immediately
    Allowed,
    /// Legal move that must be confirmed by the user before dispatch
    ConfirmationRequired,
    /// Illegal move; nothing may be dispatched
    Rejected(Rejection),
}

/// An illegal move, with a human-readable reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub from: StatusValue,
    pub to: StatusValue,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot move from {} to {}", self.from, self.to)
    }
}

impl From<Rejection> for crate::error::GearGuardError {
    fn from(rejection: Rejection) -> Self {
        Self::IllegalTransition {
            from: rejection.from.to_string(),
            to: rejection.to.to_string(),
        }
    }
}

/// Statuses reachable in one step from `current`. Unrecognized statuses reach nothing.
pub fn legal_targets(current: &StatusValue) -> &'static [RequestStatus] {
    match current {
        StatusValue::Known(status) => status.next_statuses(),
        StatusValue::Unrecognized(_) => &[],
    }
}

/// True iff `target` is an edge out of `current` in the transition table
pub fn is_legal(current: &StatusValue, target: &StatusValue) -> bool {
    match (current, target) {
        (StatusValue::Known(from), StatusValue::Known(to)) => from.can_transition_to(to),
        _ => false,
    }
}

/// True iff moving into `target` is irreversible (SCRAP marks the equipment unusable)
pub fn requires_confirmation(target: &StatusValue) -> bool {
    target.is(RequestStatus::Scrap)
}

/// Full decision for a proposed move
pub fn check(current: &StatusValue, target: &StatusValue) -> Verdict {
    if current == target {
        return Verdict::Unchanged;
    }

    if !is_legal(current, target) {
        return Verdict::Rejected(Rejection {
            from: current.clone(),
            to: target.clone(),
        });
    }

    if requires_confirmation(target) {
        Verdict::ConfirmationRequired
    } else {
        Verdict::Allowed
    }
}
