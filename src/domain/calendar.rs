use crate::domain::request::{MaintenanceRequest, RequestId, RequestType};
use crate::domain::status::StatusValue;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A scheduled preventive maintenance entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: RequestId,
    pub subject: String,
    pub scheduled_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_name: Option<String>,
    #[serde(default = "preventive")]
    pub request_type: RequestType,
    /// Absent when the calendar feed omits it; never assumed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusValue>,
}

fn preventive() -> RequestType {
    RequestType::Preventive
}

impl CalendarEvent {
    /// Builds an event for a request that has a scheduled date
    pub fn from_request(request: &MaintenanceRequest) -> Option<Self> {
        let scheduled_date = request.scheduled_date?;
        Some(Self {
            id: request.id,
            subject: request.subject.clone(),
            scheduled_date,
            equipment_name: request.equipment_name.clone(),
            request_type: request.request_type,
            status: Some(request.status.clone()),
        })
    }

    pub fn day(&self) -> NaiveDate {
        self.scheduled_date.date_naive()
    }
}

/// Preventive requests with a schedule, ordered by date then id
pub fn preventive_schedule(requests: &[MaintenanceRequest]) -> Vec<CalendarEvent> {
    let mut events: Vec<CalendarEvent> = requests
        .iter()
        .filter(|request| request.request_type == RequestType::Preventive)
        .filter_map(CalendarEvent::from_request)
        .collect();
    sort_events(&mut events);
    events
}

pub fn sort_events(events: &mut [CalendarEvent]) {
    events.sort_by(|a, b| {
        a.scheduled_date
            .cmp(&b.scheduled_date)
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Groups events by their UTC calendar day
pub fn group_by_day(events: Vec<CalendarEvent>) -> BTreeMap<NaiveDate, Vec<CalendarEvent>> {
    let mut days: BTreeMap<NaiveDate, Vec<CalendarEvent>> = BTreeMap::new();
    for event in events {
        days.entry(event.day()).or_default().push(event);
    }
    for events in days.values_mut() {
        sort_events(events);
    }
    days
}
