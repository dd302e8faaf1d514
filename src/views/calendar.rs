use crate::{
    domain::calendar::{group_by_day, CalendarEvent},
    error::Result,
    source::DataSource,
};
use chrono::NaiveDate;
use std::{collections::BTreeMap, sync::Arc};

/// Preventive maintenance schedule, one entry per day that has work
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    pub days: BTreeMap<NaiveDate, Vec<CalendarEvent>>,
}

impl Schedule {
    pub fn on(&self, day: NaiveDate) -> &[CalendarEvent] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn event_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// Events from `from` onwards, in date order
    pub fn upcoming(&self, from: NaiveDate) -> impl Iterator<Item = &CalendarEvent> {
        self.days.range(from..).flat_map(|(_, events)| events.iter())
    }
}

pub struct MaintenanceCalendar {
    source: Arc<dyn DataSource>,
}

impl MaintenanceCalendar {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self { source }
    }

    pub async fn load(&self) -> Result<Schedule> {
        let events = self.source.list_calendar().await?;
        Ok(Schedule {
            days: group_by_day(events),
        })
    }
}
