use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;

use mentorsync_core::errors::BookingError;
use mentorsync_core::models::time_slot::DayOfWeek;
use mentorsync_core::scheduling::{occurrences, validate_pattern, Occurrence};

fn ten_am() -> NaiveTime {
    NaiveTime::from_hms_opt(10, 0, 0).unwrap()
}

fn eleven_am() -> NaiveTime {
    NaiveTime::from_hms_opt(11, 0, 0).unwrap()
}

#[test]
fn test_weekly_pattern_over_one_week_window() {
    // 2026-03-02 is a Monday.
    let now = Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap();
    let days = [DayOfWeek::Monday, DayOfWeek::Wednesday, DayOfWeek::Friday];

    let slots = occurrences(&days, ten_am(), Duration::hours(1), now, 7);

    let expected: Vec<Occurrence> = [2, 4, 6]
        .iter()
        .map(|&day| {
            let start = Utc.with_ymd_and_hms(2026, 3, day, 10, 0, 0).unwrap();
            Occurrence {
                start,
                end: start + Duration::hours(1),
            }
        })
        .collect();

    assert_eq!(slots, expected);
    assert!(slots.iter().all(|slot| slot.start > now));
}

#[test]
fn test_same_day_occurrence_skipped_once_started() {
    // Monday noon: Monday's 10:00 slot is already in the past.
    let now = Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();
    let days = [DayOfWeek::Monday, DayOfWeek::Wednesday, DayOfWeek::Friday];

    let slots = occurrences(&days, ten_am(), Duration::hours(1), now, 7);

    assert_eq!(slots.len(), 2);
    assert_eq!(
        slots[0].start,
        Utc.with_ymd_and_hms(2026, 3, 4, 10, 0, 0).unwrap()
    );
    assert_eq!(
        slots[1].start,
        Utc.with_ymd_and_hms(2026, 3, 6, 10, 0, 0).unwrap()
    );
}

#[test]
fn test_window_covers_exactly_one_instance_per_pattern_day() {
    let now = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap();
    let days = [DayOfWeek::Sunday];

    let slots = occurrences(&days, ten_am(), Duration::minutes(30), now, 7);

    assert_eq!(slots.len(), 1);
    assert_eq!(
        slots[0].start.date_naive(),
        NaiveDate::from_ymd_opt(2026, 3, 8).unwrap()
    );
}

#[rstest]
#[case(0)]
#[case(-3)]
fn test_non_positive_window_yields_nothing(#[case] window_days: i64) {
    let now = Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap();
    let days = [DayOfWeek::Monday];

    let slots = occurrences(&days, ten_am(), Duration::hours(1), now, window_days);

    assert!(slots.is_empty());
}

#[test]
fn test_fourteen_day_window_repeats_the_pattern() {
    let now = Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap();
    let days = [DayOfWeek::Monday];

    let slots = occurrences(&days, ten_am(), Duration::hours(1), now, 14);

    assert_eq!(slots.len(), 2);
    assert_eq!(slots[1].start - slots[0].start, Duration::days(7));
}

#[test]
fn test_validate_pattern_accepts_well_formed_input() {
    let result = validate_pattern(&[DayOfWeek::Tuesday], ten_am(), eleven_am(), 5);
    assert!(result.is_ok());
}

#[test]
fn test_validate_pattern_rejects_empty_days() {
    let result = validate_pattern(&[], ten_am(), eleven_am(), 5);
    assert!(matches!(result, Err(BookingError::Validation(_))));
}

#[rstest]
#[case(NaiveTime::from_hms_opt(10, 0, 0).unwrap())]
#[case(NaiveTime::from_hms_opt(9, 0, 0).unwrap())]
fn test_validate_pattern_rejects_non_positive_duration(#[case] end: NaiveTime) {
    let result = validate_pattern(&[DayOfWeek::Tuesday], ten_am(), end, 5);
    assert!(matches!(result, Err(BookingError::Validation(_))));
}

#[test]
fn test_validate_pattern_rejects_zero_capacity() {
    let result = validate_pattern(&[DayOfWeek::Tuesday], ten_am(), eleven_am(), 0);
    assert!(matches!(result, Err(BookingError::Validation(_))));
}
