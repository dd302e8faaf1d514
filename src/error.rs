use thiserror::Error;

pub type Result<T> = std::result::Result<T, GearGuardError>;

#[derive(Debug, Error)]
pub enum GearGuardError {
    #[error("Maintenance request not found: {0}")]
    RequestNotFound(String),

    #[error("Equipment not found: {0}")]
    EquipmentNotFound(String),

    #[error("Cannot move from {from} to {to}")]
    IllegalTransition { from: String, to: String },

    #[error("Unknown request status: {0}")]
    UnknownStatus(String),

    #[error("Invalid request ID format: {0}")]
    InvalidRequestId(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("API request failed with status {status}: {}", .messages.join(", "))]
    Api { status: u16, messages: Vec<String> },

    #[cfg(feature = "http-source")]
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GearGuardError {
    /// Every user-facing message carried by this error.
    ///
    /// API errors expose each message reported by the server; everything else
    /// collapses to its display string.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Api { messages, .. } if !messages.is_empty() => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_messages() {
        let err = GearGuardError::Api {
            status: 400,
            messages: vec!["Invalid transition.".to_string(), "Try again".to_string()],
        };
        assert_eq!(err.messages(), vec!["Invalid transition.", "Try again"]);
        assert_eq!(
            err.to_string(),
            "API request failed with status 400: Invalid transition., Try again"
        );
    }

    #[test]
    fn test_api_error_without_messages_falls_back_to_display() {
        let err = GearGuardError::Api {
            status: 502,
            messages: Vec::new(),
        };
        assert_eq!(err.messages(), vec!["API request failed with status 502: "]);
    }

    #[test]
    fn test_illegal_transition_message() {
        let err = GearGuardError::IllegalTransition {
            from: "New".to_string(),
            to: "Scrap".to_string(),
        };
        assert_eq!(err.messages(), vec!["Cannot move from New to Scrap"]);
    }
}
