use crate::domain::request::MaintenanceRequest;
use crate::domain::status::StatusValue;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::str::FromStr;

/// Fields available for sorting maintenance requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Subject,
    Status,
    Scheduled,
    Equipment,
}

/// Sort order direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "id" => Ok(SortField::Id),
            "subject" => Ok(SortField::Subject),
            "status" => Ok(SortField::Status),
            "scheduled" | "scheduled_date" => Ok(SortField::Scheduled),
            "equipment" => Ok(SortField::Equipment),
            _ => Err(format!(
                "Invalid sort field '{}'. Valid fields: id, subject, status, scheduled, equipment",
                s
            )),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Ascending),
            "desc" => Ok(SortOrder::Descending),
            _ => Err(format!(
                "Invalid sort order '{}'. Valid orders: asc, desc",
                s
            )),
        }
    }
}

/// Sorts maintenance requests in-place.
///
/// Requests without a scheduled date always sort after scheduled ones, whatever
/// the direction. Ties fall back to ascending id so the order is stable across
/// refetches.
///
/// # Examples
/// ```
/// use gearguard_core::domain::equipment::EquipmentId;
/// use gearguard_core::domain::request::{MaintenanceRequest, RequestId, RequestType};
/// use gearguard_core::domain::sorting::{sort_requests, SortField, SortOrder};
///
/// let mut requests = vec![
///     MaintenanceRequest::new(RequestId::new(3), "C".to_string(), EquipmentId::new(1), RequestType::Corrective),
///     MaintenanceRequest::new(RequestId::new(1), "A".to_string(), EquipmentId::new(1), RequestType::Corrective),
/// ];
///
/// sort_requests(&mut requests, SortField::Id, SortOrder::Ascending);
/// assert_eq!(requests[0].id, RequestId::new(1));
/// ```
pub fn sort_requests(requests: &mut [MaintenanceRequest], field: SortField, order: SortOrder) {
    requests.sort_by(|a, b| {
        let directed = |cmp: Ordering| match order {
            SortOrder::Ascending => cmp,
            SortOrder::Descending => cmp.reverse(),
        };

        let cmp = match field {
            SortField::Id => directed(a.id.cmp(&b.id)),
            SortField::Subject => {
                directed(a.subject.to_lowercase().cmp(&b.subject.to_lowercase()))
            }
            SortField::Status => directed(compare_status(&a.status, &b.status)),
            SortField::Scheduled => {
                compare_option_dates(a.scheduled_date, b.scheduled_date, order)
            }
            SortField::Equipment => directed(a.equipment.cmp(&b.equipment)),
        };

        cmp.then_with(|| a.id.cmp(&b.id))
    });
}

/// Compare by workflow stage: New → In Progress → Repaired → Scrap.
/// Unrecognized statuses come last.
fn compare_status(a: &StatusValue, b: &StatusValue) -> Ordering {
    fn rank(s: &StatusValue) -> u8 {
        s.known().map(|status| status.workflow_rank()).unwrap_or(u8::MAX)
    }
    rank(a).cmp(&rank(b))
}

/// Compare Option<DateTime>; None always sorts to the end
fn compare_option_dates(
    a: Option<DateTime<Utc>>,
    b: Option<DateTime<Utc>>,
    order: SortOrder,
) -> Ordering {
    match (a, b) {
        (Some(a_date), Some(b_date)) => match order {
            SortOrder::Ascending => a_date.cmp(&b_date),
            SortOrder::Descending => b_date.cmp(&a_date),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
