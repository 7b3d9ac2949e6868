//! Pure enumeration of concrete slot occurrences from a recurring weekly
//! pattern. Persistence-level deduplication (the `(mentor_id, start_time)`
//! idempotency key) lives in the db crate; this module only computes the
//! candidate start/end instants for a forward window.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};

use crate::errors::{BookingError, BookingResult};
use crate::models::time_slot::DayOfWeek;

/// A concrete start/end pair produced from a recurring pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Validates the shape of a recurring pattern before any enumeration.
pub fn validate_pattern(
    recurring_days: &[DayOfWeek],
    start_time_of_day: NaiveTime,
    end_time_of_day: NaiveTime,
    max_students: i32,
) -> BookingResult<()> {
    if recurring_days.is_empty() {
        return Err(BookingError::Validation(
            "recurring pattern must include at least one weekday".to_string(),
        ));
    }
    if end_time_of_day <= start_time_of_day {
        return Err(BookingError::Validation(
            "slot end time must be later than its start time".to_string(),
        ));
    }
    if max_students < 1 {
        return Err(BookingError::Validation(
            "max_students must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Enumerates every occurrence of the pattern in `[today, today + window_days)`.
///
/// Occurrences whose start has already passed are skipped, so a run on a
/// pattern day still yields that day's slot when its start is in the future.
/// A non-positive window yields nothing.
pub fn occurrences(
    recurring_days: &[DayOfWeek],
    start_time_of_day: NaiveTime,
    duration: Duration,
    now: DateTime<Utc>,
    window_days: i64,
) -> Vec<Occurrence> {
    let mut slots = Vec::new();
    if window_days <= 0 {
        return slots;
    }

    let today = now.date_naive();
    for offset in 0..window_days {
        let date = today + Duration::days(offset);
        let weekday = date.weekday();
        if !recurring_days.iter().any(|day| day.to_chrono() == weekday) {
            continue;
        }

        let start = date.and_time(start_time_of_day).and_utc();
        if start <= now {
            continue;
        }

        slots.push(Occurrence {
            start,
            end: start + duration,
        });
    }

    slots
}
