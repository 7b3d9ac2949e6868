//! Session state machine rules and time-derived transition math.
//!
//! The valid transitions are:
//!
//! ```text
//! SCHEDULED -> ONGOING -> COMPLETED
//! SCHEDULED -> CANCELLED
//! ONGOING   -> CANCELLED
//! ```
//!
//! Everything else is rejected with [`BookingError::InvalidStateTransition`]
//! and leaves the record unchanged.

use chrono::{DateTime, Duration, Utc};

use crate::errors::{BookingError, BookingResult};
use crate::models::session::SessionStatus;

/// How much later than the scheduled start a session may begin before it is
/// considered delayed and its expected end is recomputed from the actual
/// start.
pub const DELAY_THRESHOLD_MINUTES: i64 = 5;

pub fn delay_threshold() -> Duration {
    Duration::minutes(DELAY_THRESHOLD_MINUTES)
}

pub fn can_transition(from: SessionStatus, to: SessionStatus) -> bool {
    use SessionStatus::*;
    matches!(
        (from, to),
        (Scheduled, Ongoing) | (Ongoing, Completed) | (Scheduled, Cancelled) | (Ongoing, Cancelled)
    )
}

pub fn ensure_transition(from: SessionStatus, to: SessionStatus) -> BookingResult<()> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(BookingError::InvalidStateTransition { from, to })
    }
}

/// Whether a start at `now` is materially later than the scheduled start.
pub fn is_materially_late(scheduled_start: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now - scheduled_start >= delay_threshold()
}

/// Timing inputs for computing a session's expected end.
#[derive(Debug, Clone, Copy)]
pub struct SessionTiming {
    /// The slot's start time, or `scheduled_at` for direct bookings.
    pub scheduled_start: DateTime<Utc>,
    /// Slot end minus slot start when a slot is linked, else the booked
    /// duration.
    pub planned_duration: Duration,
    pub is_delayed: bool,
    pub manual_start_time: Option<DateTime<Utc>>,
}

/// Expected end of a session: delayed sessions run their full planned
/// duration from the actual start; on-time sessions end on schedule.
pub fn expected_end(timing: &SessionTiming) -> DateTime<Utc> {
    match (timing.is_delayed, timing.manual_start_time) {
        (true, Some(actual_start)) => actual_start + timing.planned_duration,
        _ => timing.scheduled_start + timing.planned_duration,
    }
}
