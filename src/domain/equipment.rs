use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Server-assigned equipment identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquipmentId(u64);

impl EquipmentId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl FromStr for EquipmentId {
    type Err = crate::error::GearGuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .trim_start_matches('#')
            .parse::<u64>()
            .map(Self)
            .map_err(|_| {
                crate::error::GearGuardError::InvalidRequest(format!("invalid equipment ID: {}", s))
            })
    }
}

impl fmt::Display for EquipmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn default_usable() -> bool {
    true
}

/// A piece of equipment under maintenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: EquipmentId,
    pub name: String,
    pub serial_number: String,
    #[serde(default, alias = "department_or_owner", skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default = "default_usable")]
    pub is_usable: bool,
}

impl Equipment {
    pub fn new(id: EquipmentId, name: String, serial_number: String) -> Self {
        Self {
            id,
            name,
            serial_number,
            department: None,
            location: None,
            is_usable: true,
        }
    }

    pub fn with_department(mut self, department: &str) -> Self {
        self.department = Some(department.to_string());
        self
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }

    /// Scrapping a request takes its equipment out of service
    pub fn mark_unusable(&mut self) {
        self.is_usable = false;
    }
}
