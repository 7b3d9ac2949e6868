use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;

use mentorsync_core::errors::BookingError;
use mentorsync_core::lifecycle::{
    can_transition, delay_threshold, ensure_transition, expected_end, is_materially_late,
    SessionTiming,
};
use mentorsync_core::models::session::SessionStatus;

use SessionStatus::*;

#[rstest]
#[case(Scheduled, Ongoing)]
#[case(Ongoing, Completed)]
#[case(Scheduled, Cancelled)]
#[case(Ongoing, Cancelled)]
fn test_permitted_transitions(#[case] from: SessionStatus, #[case] to: SessionStatus) {
    assert!(can_transition(from, to));
    assert!(ensure_transition(from, to).is_ok());
}

#[rstest]
#[case(Scheduled, Completed)]
#[case(Scheduled, Scheduled)]
#[case(Ongoing, Scheduled)]
#[case(Ongoing, Ongoing)]
fn test_rejected_transitions(#[case] from: SessionStatus, #[case] to: SessionStatus) {
    assert!(!can_transition(from, to));
}

#[rstest]
#[case(Completed)]
#[case(Cancelled)]
fn test_terminal_states_admit_nothing(#[case] from: SessionStatus) {
    assert!(from.is_terminal());
    for to in [Scheduled, Ongoing, Completed, Cancelled] {
        assert!(!can_transition(from, to));
    }
}

#[test]
fn test_ensure_transition_reports_the_offending_pair() {
    let error = ensure_transition(Completed, Ongoing).unwrap_err();
    match error {
        BookingError::InvalidStateTransition { from, to } => {
            assert_eq!(from, Completed);
            assert_eq!(to, Ongoing);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_delay_detection_around_the_threshold() {
    let scheduled = Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap();

    assert!(!is_materially_late(scheduled, scheduled));
    assert!(!is_materially_late(
        scheduled,
        scheduled + delay_threshold() - Duration::seconds(1)
    ));
    assert!(is_materially_late(scheduled, scheduled + delay_threshold()));
    assert!(is_materially_late(
        scheduled,
        scheduled + Duration::minutes(20)
    ));
}

#[test]
fn test_on_time_session_ends_on_schedule() {
    let scheduled = Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap();
    let timing = SessionTiming {
        scheduled_start: scheduled,
        planned_duration: Duration::minutes(60),
        is_delayed: false,
        manual_start_time: None,
    };

    assert_eq!(expected_end(&timing), scheduled + Duration::minutes(60));
}

#[test]
fn test_delayed_session_runs_its_full_duration_from_actual_start() {
    // Scheduled 10:00 for 60 minutes, actually started 10:20: the session
    // ends 11:20, not 11:00.
    let scheduled = Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap();
    let actual = scheduled + Duration::minutes(20);
    let timing = SessionTiming {
        scheduled_start: scheduled,
        planned_duration: Duration::minutes(60),
        is_delayed: true,
        manual_start_time: Some(actual),
    };

    assert_eq!(
        expected_end(&timing),
        Utc.with_ymd_and_hms(2026, 3, 2, 11, 20, 0).unwrap()
    );
}

#[test]
fn test_delayed_session_without_actual_start_falls_back_to_schedule() {
    // Sweep-promoted sessions are delayed but have no manual start; they
    // complete at the scheduled end.
    let scheduled = Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap();
    let timing = SessionTiming {
        scheduled_start: scheduled,
        planned_duration: Duration::minutes(45),
        is_delayed: true,
        manual_start_time: None,
    };

    assert_eq!(expected_end(&timing), scheduled + Duration::minutes(45));
}
