use crate::{
    domain::{
        sorting::{sort_requests, SortField, SortOrder},
        Equipment, EquipmentId, MaintenanceRequest,
    },
    error::Result,
    source::DataSource,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Maintenance history of one piece of equipment
#[derive(Debug, Clone)]
pub struct EquipmentDetail {
    pub equipment_id: EquipmentId,
    /// Sorted by scheduled date, unscheduled last
    pub requests: Vec<MaintenanceRequest>,
    /// Requests still NEW or IN_PROGRESS
    pub open_count: usize,
}

impl EquipmentDetail {
    pub fn overdue<'a>(&'a self, now: DateTime<Utc>) -> impl Iterator<Item = &'a MaintenanceRequest> {
        self.requests
            .iter()
            .filter(move |r| r.is_open() && r.is_overdue(now))
    }
}

pub struct EquipmentDirectory {
    source: Arc<dyn DataSource>,
}

impl EquipmentDirectory {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self { source }
    }

    pub async fn list(&self) -> Result<Vec<Equipment>> {
        self.source.list_equipment().await
    }

    pub async fn detail(&self, id: EquipmentId) -> Result<EquipmentDetail> {
        let mut requests = self.source.equipment_requests(id).await?;
        sort_requests(&mut requests, SortField::Scheduled, SortOrder::Ascending);
        let open_count = requests.iter().filter(|r| r.is_open()).count();

        Ok(EquipmentDetail {
            equipment_id: id,
            requests,
            open_count,
        })
    }
}
