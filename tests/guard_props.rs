//! Property-based tests for the status transition guard.

use gearguard_core::domain::guard::{check, is_legal, legal_targets, requires_confirmation, Verdict};
use gearguard_core::{RequestStatus, StatusValue};
use proptest::prelude::*;

const TABLE: &[(RequestStatus, RequestStatus)] = &[
    (RequestStatus::New, RequestStatus::InProgress),
    (RequestStatus::InProgress, RequestStatus::Repaired),
    (RequestStatus::InProgress, RequestStatus::Scrap),
    (RequestStatus::Repaired, RequestStatus::Scrap),
];

fn arb_status() -> impl Strategy<Value = RequestStatus> {
    prop_oneof![
        Just(RequestStatus::New),
        Just(RequestStatus::InProgress),
        Just(RequestStatus::Repaired),
        Just(RequestStatus::Scrap),
    ]
}

/// Known statuses plus raw values that never name one
fn arb_status_value() -> impl Strategy<Value = StatusValue> {
    prop_oneof![
        3 => arb_status().prop_map(StatusValue::Known),
        1 => "x[a-z_]{0,10}".prop_map(|raw| StatusValue::from(raw.as_str())),
    ]
}

fn in_table(current: &StatusValue, target: &StatusValue) -> bool {
    match (current.known(), target.known()) {
        (Some(from), Some(to)) => TABLE.contains(&(from, to)),
        _ => false,
    }
}

proptest! {
    /// Legal exactly on the table's edges; everything else, self-moves included, is refused
    #[test]
    fn prop_legal_iff_in_table(current in arb_status_value(), target in arb_status_value()) {
        prop_assert_eq!(is_legal(&current, &target), in_table(&current, &target));
    }

    /// Self-moves are silent skips, never rejections
    #[test]
    fn prop_same_status_is_unchanged(status in arb_status_value()) {
        prop_assert!(!is_legal(&status, &status));
        prop_assert_eq!(check(&status, &status), Verdict::Unchanged);
    }

    /// Only SCRAP needs confirmation, whatever the value
    #[test]
    fn prop_confirmation_only_for_scrap(target in arb_status_value()) {
        prop_assert_eq!(
            requires_confirmation(&target),
            target == StatusValue::Known(RequestStatus::Scrap)
        );
    }

    /// check agrees with is_legal and requires_confirmation
    #[test]
    fn prop_check_is_consistent(current in arb_status_value(), target in arb_status_value()) {
        let verdict = check(&current, &target);
        if current == target {
            prop_assert_eq!(verdict, Verdict::Unchanged);
        } else if !is_legal(&current, &target) {
            prop_assert!(matches!(verdict, Verdict::Rejected(_)), "expected a rejection");
        } else if requires_confirmation(&target) {
            prop_assert_eq!(verdict, Verdict::ConfirmationRequired);
        } else {
            prop_assert_eq!(verdict, Verdict::Allowed);
        }
    }

    /// Any spelling other than the exact code stays unrecognized and is refused
    #[test]
    fn prop_non_canonical_spelling_fails_closed(status in arb_status(), other in arb_status()) {
        for raw in [status.code().to_lowercase(), format!(" {} ", status.code()), status.to_string()] {
            let value = StatusValue::from(raw.as_str());
            prop_assert_eq!(value.clone(), StatusValue::Unrecognized(raw.clone()));
            prop_assert!(!is_legal(&value, &StatusValue::Known(other)));
            prop_assert!(!is_legal(&StatusValue::Known(other), &value));
            prop_assert!(!requires_confirmation(&value));
        }
    }

    /// Unrecognized values are never legal on either side
    #[test]
    fn prop_unrecognized_fails_closed(raw in "x[a-z]{1,8}", other in arb_status()) {
        let odd = StatusValue::from(raw.as_str());
        prop_assert!(odd.known().is_none());
        prop_assert!(!is_legal(&odd, &StatusValue::Known(other)));
        prop_assert!(!is_legal(&StatusValue::Known(other), &odd));
        prop_assert!(legal_targets(&odd).is_empty());
    }
}

#[test]
fn test_every_non_terminal_status_has_a_way_forward() {
    for status in [RequestStatus::New, RequestStatus::InProgress, RequestStatus::Repaired] {
        assert!(!legal_targets(&StatusValue::Known(status)).is_empty());
    }
    assert!(legal_targets(&StatusValue::Known(RequestStatus::Scrap)).is_empty());
}

#[test]
fn test_no_back_edges() {
    for (from, to) in TABLE {
        assert!(to.workflow_rank() > from.workflow_rank());
    }
}
