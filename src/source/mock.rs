use crate::{
    domain::{
        calendar::preventive_schedule, guard, CalendarEvent, Equipment, EquipmentId,
        MaintenanceRequest, NewRequest, RequestFilter, RequestId, RequestStatus, RequestType,
        StatusValue,
    },
    error::{GearGuardError, Result},
    source::DataSource,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::{
    collections::VecDeque,
    path::Path,
    sync::{Mutex, MutexGuard},
};
use tokio::fs;

/// Contents of a mock fixture file
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MockFixture {
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    #[serde(default)]
    pub requests: Vec<MaintenanceRequest>,
}

#[derive(Debug)]
struct MockState {
    equipment: Vec<Equipment>,
    requests: Vec<MaintenanceRequest>,
    next_request_id: u64,
    pending_failures: VecDeque<Vec<String>>,
    update_calls: usize,
}

/// In-memory data source that behaves like the maintenance backend.
///
/// Status updates are validated against the transition table, and scrapping a
/// request marks its equipment unusable.
#[derive(Debug)]
pub struct MockDataSource {
    state: Mutex<MockState>,
}

impl MockDataSource {
    pub fn new(equipment: Vec<Equipment>, requests: Vec<MaintenanceRequest>) -> Self {
        let next_request_id = requests.iter().map(|r| r.id.get()).max().unwrap_or(0) + 1;
        Self {
            state: Mutex::new(MockState {
                equipment,
                requests,
                next_request_id,
                pending_failures: VecDeque::new(),
                update_calls: 0,
            }),
        }
    }

    /// Loads equipment and requests from a JSON fixture file
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).await?;
        let fixture: MockFixture = serde_json::from_str(&contents)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            equipment = fixture.equipment.len(),
            requests = fixture.requests.len(),
            "Loaded mock fixture"
        );
        Ok(Self::new(fixture.equipment, fixture.requests))
    }

    /// Demo data set: six machines and eight requests scheduled around today
    pub fn seeded() -> Self {
        let equipment = vec![
            Equipment::new(
                EquipmentId::new(1),
                "Industrial Generator Model XG-500".to_string(),
                "GEN-2024-001".to_string(),
            )
            .with_department("Facilities Department")
            .with_location("Building A - Basement"),
            Equipment::new(
                EquipmentId::new(2),
                "Air Compressor AC-750".to_string(),
                "CMP-2024-002".to_string(),
            )
            .with_department("Manufacturing")
            .with_location("Workshop - Floor 2"),
            Equipment::new(
                EquipmentId::new(3),
                "HVAC Unit - Central Cooling".to_string(),
                "HVAC-2023-003".to_string(),
            )
            .with_department("Building Operations")
            .with_location("Rooftop - Building B"),
            Equipment::new(
                EquipmentId::new(4),
                "Water Pump System WP-300".to_string(),
                "WP-2024-004".to_string(),
            )
            .with_department("Utilities")
            .with_location("Basement - Water Treatment"),
            Equipment {
                is_usable: false,
                ..Equipment::new(
                    EquipmentId::new(5),
                    "Conveyor Belt System CB-1200".to_string(),
                    "CB-2022-005".to_string(),
                )
                .with_department("Production Line")
                .with_location("Factory Floor - Section C")
            },
            Equipment::new(
                EquipmentId::new(6),
                "Backup Generator BG-200".to_string(),
                "GEN-2023-006".to_string(),
            )
            .with_department("Emergency Services")
            .with_location("Building C - Generator Room"),
        ];

        let now = Utc::now();
        let seed = [
            (1, "Monthly preventive maintenance check", 1, RequestType::Preventive, Duration::days(7), "02:00:00", RequestStatus::New, "Electrical Team", "Raj Sharma"),
            (2, "Strange noise during operation", 2, RequestType::Corrective, Duration::days(1), "03:00:00", RequestStatus::InProgress, "Mechanical Team", "Arjun Kumar"),
            (3, "Quarterly HVAC filter replacement", 3, RequestType::Preventive, Duration::days(14), "01:30:00", RequestStatus::New, "HVAC Team", "Sneha Reddy"),
            (4, "Water leak detected", 4, RequestType::Corrective, Duration::hours(4), "04:00:00", RequestStatus::New, "Plumbing Team", "Priya Patel"),
            (5, "Belt replacement and alignment", 5, RequestType::Corrective, Duration::days(-2), "06:00:00", RequestStatus::Repaired, "Mechanical Team", "Vikram Singh"),
            (6, "Annual safety inspection", 6, RequestType::Preventive, Duration::days(30), "02:00:00", RequestStatus::New, "Electrical Team", "Raj Sharma"),
            (7, "Oil change and fluid check", 1, RequestType::Preventive, Duration::days(21), "01:00:00", RequestStatus::New, "Electrical Team", "Priya Patel"),
            (8, "Pressure gauge malfunction", 2, RequestType::Corrective, Duration::days(3), "02:00:00", RequestStatus::New, "Mechanical Team", "Arjun Kumar"),
        ];

        let requests = seed
            .into_iter()
            .map(
                |(id, subject, equipment_id, request_type, offset, duration, status, team, technician)| {
                    let equipment_id = EquipmentId::new(equipment_id);
                    let mut request = MaintenanceRequest::new(
                        RequestId::new(id),
                        subject.to_string(),
                        equipment_id,
                        request_type,
                    )
                    .with_status(status)
                    .with_schedule(now + offset);
                    request.equipment_name = equipment
                        .iter()
                        .find(|e| e.id == equipment_id)
                        .map(|e| e.name.clone());
                    request.duration = Some(duration.to_string());
                    request.team_name = Some(team.to_string());
                    request.technician_name = Some(technician.to_string());
                    request
                },
            )
            .collect();

        Self::new(equipment, requests)
    }

    /// Makes the next status update fail with the given server messages
    pub fn fail_next_update(&self, messages: Vec<String>) -> Result<()> {
        self.state()?.pending_failures.push_back(messages);
        Ok(())
    }

    /// Number of status updates received, failed ones included
    pub fn update_calls(&self) -> Result<usize> {
        Ok(self.state()?.update_calls)
    }

    pub fn equipment(&self, id: EquipmentId) -> Result<Equipment> {
        self.state()?
            .equipment
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| GearGuardError::EquipmentNotFound(id.to_string()))
    }

    fn state(&self) -> Result<MutexGuard<'_, MockState>> {
        self.state
            .lock()
            .map_err(|_| GearGuardError::from(anyhow::anyhow!("mock data source state poisoned")))
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    async fn list_requests(&self, filter: &RequestFilter) -> Result<Vec<MaintenanceRequest>> {
        Ok(self
            .state()?
            .requests
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn update_request_status(&self, id: RequestId, status: RequestStatus) -> Result<()> {
        let mut state = self.state()?;
        state.update_calls += 1;

        if let Some(messages) = state.pending_failures.pop_front() {
            tracing::debug!(request_id = %id, "Mock data source failing update on request");
            return Err(GearGuardError::Api {
                status: 500,
                messages,
            });
        }

        let request = state
            .requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| GearGuardError::RequestNotFound(id.to_string()))?;

        let target = StatusValue::Known(status);
        if !guard::is_legal(&request.status, &target) {
            return Err(GearGuardError::Api {
                status: 400,
                messages: vec![format!(
                    "Cannot move from {} to {}",
                    request.status, target
                )],
            });
        }

        request.status = target;
        let equipment_id = request.equipment;

        if status == RequestStatus::Scrap {
            if let Some(equipment) = state.equipment.iter_mut().find(|e| e.id == equipment_id) {
                equipment.mark_unusable();
            }
        }

        Ok(())
    }

    async fn create_request(&self, new_request: &NewRequest) -> Result<MaintenanceRequest> {
        new_request.validate()?;

        let mut state = self.state()?;
        let equipment_name = state
            .equipment
            .iter()
            .find(|e| e.id == new_request.equipment)
            .map(|e| e.name.clone())
            .ok_or_else(|| GearGuardError::EquipmentNotFound(new_request.equipment.to_string()))?;

        let id = RequestId::new(state.next_request_id);
        state.next_request_id += 1;

        let mut request = MaintenanceRequest::new(
            id,
            new_request.subject.trim().to_string(),
            new_request.equipment,
            new_request.request_type,
        );
        request.equipment_name = Some(equipment_name);
        request.scheduled_date = new_request.scheduled_date;

        state.requests.push(request.clone());
        Ok(request)
    }

    async fn list_equipment(&self) -> Result<Vec<Equipment>> {
        Ok(self.state()?.equipment.clone())
    }

    async fn equipment_requests(&self, id: EquipmentId) -> Result<Vec<MaintenanceRequest>> {
        let state = self.state()?;
        if !state.equipment.iter().any(|e| e.id == id) {
            return Err(GearGuardError::EquipmentNotFound(id.to_string()));
        }
        Ok(state
            .requests
            .iter()
            .filter(|r| r.equipment == id)
            .cloned()
            .collect())
    }

    async fn list_calendar(&self) -> Result<Vec<CalendarEvent>> {
        Ok(preventive_schedule(&self.state()?.requests))
    }
}
