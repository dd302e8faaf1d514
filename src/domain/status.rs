use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// Lifecycle stage of a maintenance request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    New,
    InProgress,
    Repaired,
    Scrap,
}

impl RequestStatus {
    /// All statuses in workflow order
    pub const ALL: [RequestStatus; 4] = [
        RequestStatus::New,
        RequestStatus::InProgress,
        RequestStatus::Repaired,
        RequestStatus::Scrap,
    ];

    /// Wire code used by the REST API (e.g. `IN_PROGRESS`)
    pub fn code(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::InProgress => "IN_PROGRESS",
            Self::Repaired => "REPAIRED",
            Self::Scrap => "SCRAP",
        }
    }

    /// Looks up a status by its exact wire code. Case, whitespace and labels are not tolerated.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }

    /// Position in the workflow. Only meaningful for ordering.
    pub fn workflow_rank(&self) -> u8 {
        match self {
            Self::New => 0,
            Self::InProgress => 1,
            Self::Repaired => 2,
            Self::Scrap => 3,
        }
    }

    /// Statuses this one may move to next
    pub fn next_statuses(&self) -> &'static [RequestStatus] {
        match self {
            Self::New => &[Self::InProgress],
            Self::InProgress => &[Self::Repaired, Self::Scrap],
            Self::Repaired => &[Self::Scrap],
            Self::Scrap => &[],
        }
    }

    /// Checks if a status transition is valid. Moving to the same status is not a transition.
    pub fn can_transition_to(&self, target: &RequestStatus) -> bool {
        self.next_statuses().contains(target)
    }

    pub fn is_terminal(&self) -> bool {
        self.next_statuses().is_empty()
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "New"),
            Self::InProgress => write!(f, "In Progress"),
            Self::Repaired => write!(f, "Repaired"),
            Self::Scrap => write!(f, "Scrap"),
        }
    }
}

impl FromStr for RequestStatus {
    type Err = crate::error::GearGuardError;

    /// Accepts only the exact wire codes
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| crate::error::GearGuardError::UnknownStatus(s.to_string()))
    }
}

/// A status as carried by the API: either one we know, or a raw value we don't.
///
/// Unrecognized values are kept verbatim and never coerced to a known status.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatusValue {
    Known(RequestStatus),
    Unrecognized(String),
}

impl StatusValue {
    pub fn known(&self) -> Option<RequestStatus> {
        match self {
            Self::Known(status) => Some(*status),
            Self::Unrecognized(_) => None,
        }
    }

    pub fn is(&self, status: RequestStatus) -> bool {
        self.known() == Some(status)
    }
}

impl From<RequestStatus> for StatusValue {
    fn from(status: RequestStatus) -> Self {
        Self::Known(status)
    }
}

impl From<&str> for StatusValue {
    fn from(raw: &str) -> Self {
        match RequestStatus::from_code(raw) {
            Some(status) => Self::Known(status),
            None => Self::Unrecognized(raw.to_string()),
        }
    }
}

impl fmt::Display for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(status) => write!(f, "{}", status),
            Self::Unrecognized(raw) => write!(f, "{}", raw),
        }
    }
}

impl Serialize for StatusValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Known(status) => serializer.serialize_str(status.code()),
            Self::Unrecognized(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for StatusValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_round_trip_through_parse() {
        for status in RequestStatus::ALL {
            assert_eq!(RequestStatus::from_str(status.code()).unwrap(), status);
        }
    }

    #[test]
    fn test_status_parsing_requires_exact_codes() {
        assert_eq!(RequestStatus::from_code("IN_PROGRESS"), Some(RequestStatus::InProgress));
        for raw in ["in_progress", "In Progress", "in-progress", " SCRAP ", "scrap", "DONE", ""] {
            assert!(RequestStatus::from_str(raw).is_err(), "{:?} parsed", raw);
            assert_eq!(RequestStatus::from_code(raw), None);
        }
    }

    #[test]
    fn test_non_canonical_wire_values_stay_unrecognized() {
        for raw in ["scrap", "in-progress", " NEW ", "Repaired"] {
            let value: StatusValue = serde_json::from_str(&format!("\"{}\"", raw)).unwrap();
            assert_eq!(value, StatusValue::Unrecognized(raw.to_string()));
            assert_eq!(serde_json::to_string(&value).unwrap(), format!("\"{}\"", raw));
        }
    }

    #[test]
    fn test_status_display_labels() {
        assert_eq!(RequestStatus::New.to_string(), "New");
        assert_eq!(RequestStatus::InProgress.to_string(), "In Progress");
        assert_eq!(RequestStatus::Repaired.to_string(), "Repaired");
        assert_eq!(RequestStatus::Scrap.to_string(), "Scrap");
    }

    #[test]
    fn test_status_transitions() {
        assert!(RequestStatus::New.can_transition_to(&RequestStatus::InProgress));
        assert!(RequestStatus::InProgress.can_transition_to(&RequestStatus::Scrap));
        assert!(!RequestStatus::New.can_transition_to(&RequestStatus::New));
        assert!(!RequestStatus::Repaired.can_transition_to(&RequestStatus::InProgress));
        assert!(RequestStatus::Scrap.is_terminal());
        assert!(!RequestStatus::Repaired.is_terminal());
    }

    #[test]
    fn test_status_value_keeps_unrecognized_raw() {
        let value = StatusValue::from("ON_HOLD");
        assert_eq!(value, StatusValue::Unrecognized("ON_HOLD".to_string()));
        assert_eq!(value.known(), None);
        assert_eq!(value.to_string(), "ON_HOLD");
    }

    #[test]
    fn test_status_value_serde() {
        let value: StatusValue = serde_json::from_str("\"REPAIRED\"").unwrap();
        assert!(value.is(RequestStatus::Repaired));
        assert_eq!(serde_json::to_string(&value).unwrap(), "\"REPAIRED\"");

        let odd: StatusValue = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(serde_json::to_string(&odd).unwrap(), "\"pending\"");
    }
}
