use crate::domain::equipment::EquipmentId;
use crate::domain::status::{RequestStatus, StatusValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Server-assigned maintenance request identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(u64);

impl RequestId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl FromStr for RequestId {
    type Err = crate::error::GearGuardError;

    // Drag handles carry the id as a string
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| crate::error::GearGuardError::InvalidRequestId(s.to_string()))
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of maintenance work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestType {
    Preventive,
    #[default]
    Corrective,
}

impl RequestType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Preventive => "PREVENTIVE",
            Self::Corrective => "CORRECTIVE",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preventive => write!(f, "Preventive"),
            Self::Corrective => write!(f, "Corrective"),
        }
    }
}

/// Scheduled dates arrive either as RFC 3339 timestamps or as bare `YYYY-MM-DD` dates.
pub(crate) mod flexible_date {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid scheduled date: {}", raw))),
        }
    }
}

/// A maintenance request as served by the request store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRequest {
    pub id: RequestId,
    pub subject: String,
    #[serde(alias = "equipment_id")]
    pub equipment: EquipmentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_name: Option<String>,
    #[serde(default)]
    pub request_type: RequestType,
    pub status: StatusValue,
    #[serde(default, with = "flexible_date")]
    pub scheduled_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technician_name: Option<String>,
}

impl MaintenanceRequest {
    /// Creates a request in the NEW status
    pub fn new(
        id: RequestId,
        subject: String,
        equipment: EquipmentId,
        request_type: RequestType,
    ) -> Self {
        Self {
            id,
            subject,
            equipment,
            equipment_name: None,
            request_type,
            status: StatusValue::Known(RequestStatus::New),
            scheduled_date: None,
            duration: None,
            team_name: None,
            technician_name: None,
        }
    }

    pub fn with_status(mut self, status: RequestStatus) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_schedule(mut self, scheduled_date: DateTime<Utc>) -> Self {
        self.scheduled_date = Some(scheduled_date);
        self
    }

    /// Scheduled strictly before `now`
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.scheduled_date.map(|date| date < now).unwrap_or(false)
    }

    /// Work still outstanding: NEW or IN_PROGRESS
    pub fn is_open(&self) -> bool {
        matches!(
            self.status.known(),
            Some(RequestStatus::New) | Some(RequestStatus::InProgress)
        )
    }

    /// Name to show on a card, falling back to the equipment number
    pub fn equipment_label(&self) -> String {
        self.equipment_name
            .clone()
            .unwrap_or_else(|| format!("#{}", self.equipment))
    }
}

/// Input for creating a maintenance request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRequest {
    pub subject: String,
    pub equipment: EquipmentId,
    pub request_type: RequestType,
    #[serde(default, with = "flexible_date", skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<DateTime<Utc>>,
}

impl NewRequest {
    pub fn new(subject: String, equipment: EquipmentId, request_type: RequestType) -> Self {
        Self {
            subject,
            equipment,
            request_type,
            scheduled_date: None,
        }
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        if self.subject.trim().is_empty() {
            return Err(crate::error::GearGuardError::InvalidRequest(
                "subject must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Optional constraints for listing requests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestFilter {
    pub status: Option<RequestStatus>,
    pub equipment: Option<EquipmentId>,
    pub request_type: Option<RequestType>,
    pub page: Option<u32>,
}

impl RequestFilter {
    pub fn with_status(mut self, status: RequestStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_equipment(mut self, equipment: EquipmentId) -> Self {
        self.equipment = Some(equipment);
        self
    }

    pub fn with_request_type(mut self, request_type: RequestType) -> Self {
        self.request_type = Some(request_type);
        self
    }

    /// Applies the filter locally. Pagination is a server concern and is ignored here.
    pub fn matches(&self, request: &MaintenanceRequest) -> bool {
        let status_ok = self
            .status
            .map(|status| request.status.is(status))
            .unwrap_or(true);
        let equipment_ok = self
            .equipment
            .map(|equipment| request.equipment == equipment)
            .unwrap_or(true);
        let type_ok = self
            .request_type
            .map(|request_type| request.request_type == request_type)
            .unwrap_or(true);

        status_ok && equipment_ok && type_ok
    }

    /// Query string pairs for the REST listing endpoint
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.code().to_string()));
        }
        if let Some(equipment) = self.equipment {
            pairs.push(("equipment", equipment.to_string()));
        }
        if let Some(request_type) = self.request_type {
            pairs.push(("request_type", request_type.code().to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        pairs
    }
}
