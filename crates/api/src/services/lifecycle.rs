//! SessionLifecycle: advances a booking through its state machine.
//!
//! Transition guards are duplicated in the SQL WHERE clauses, so a race
//! between an explicit call and the sweep resolves to exactly one winner;
//! the loser gets `InvalidStateTransition` and the row is untouched.

use chrono::{DateTime, Duration, Utc};
use mentorsync_core::errors::{BookingError, BookingResult};
use mentorsync_core::lifecycle::{self, SessionTiming};
use mentorsync_core::models::session::{PaymentStatus, SessionBooking, SessionStatus};
use sqlx::PgPool;
use uuid::Uuid;

use mentorsync_db::models::DbSessionBooking;
use mentorsync_db::repositories;

pub async fn get_session(pool: &PgPool, session_id: Uuid) -> BookingResult<SessionBooking> {
    let row = fetch_session(pool, session_id).await?;
    row.into_domain().map_err(BookingError::Database)
}

/// Starts a SCHEDULED, paid session. A start materially later than the
/// scheduled instant marks the session delayed and records the actual start,
/// shifting its expected end.
pub async fn start_session(
    pool: &PgPool,
    session_id: Uuid,
    now: DateTime<Utc>,
) -> BookingResult<SessionBooking> {
    let session = fetch_session(pool, session_id).await?;
    let status = parse_status(&session.status)?;
    lifecycle::ensure_transition(status, SessionStatus::Ongoing)?;

    let payment: PaymentStatus = session
        .payment_status
        .parse()
        .map_err(BookingError::Validation)?;
    if payment != PaymentStatus::Completed {
        return Err(BookingError::Conflict(
            "session cannot start before its payment completes".to_string(),
        ));
    }

    let scheduled_start = match session.time_slot_id {
        Some(slot_id) => repositories::time_slot::get_time_slot_by_id(pool, slot_id)
            .await
            .map_err(BookingError::Database)?
            .map(|slot| slot.start_time)
            .unwrap_or(session.scheduled_at),
        None => session.scheduled_at,
    };

    let is_delayed = lifecycle::is_materially_late(scheduled_start, now);
    let manual_start_time = is_delayed.then_some(now);

    let updated =
        repositories::session::mark_started(pool, session_id, is_delayed, manual_start_time, now)
            .await
            .map_err(BookingError::Database)?;

    match updated {
        Some(row) => row.into_domain().map_err(BookingError::Database),
        None => Err(transition_conflict(pool, session_id, SessionStatus::Ongoing).await),
    }
}

/// Completes an ONGOING session, explicitly or from the sweep.
pub async fn complete_session(
    pool: &PgPool,
    session_id: Uuid,
    now: DateTime<Utc>,
    reason: Option<String>,
) -> BookingResult<SessionBooking> {
    let session = fetch_session(pool, session_id).await?;
    let status = parse_status(&session.status)?;
    lifecycle::ensure_transition(status, SessionStatus::Completed)?;

    let updated = repositories::session::mark_completed(pool, session_id, now, reason.as_deref())
        .await
        .map_err(BookingError::Database)?;

    match updated {
        Some(row) => row.into_domain().map_err(BookingError::Database),
        None => Err(transition_conflict(pool, session_id, SessionStatus::Completed).await),
    }
}

/// Cancels a SCHEDULED or ONGOING session. The seat is released only when
/// the linked slot has not started yet; a slot already in the past stays as
/// the historical record of the engagement.
pub async fn cancel_session(
    pool: &PgPool,
    session_id: Uuid,
    reason: &str,
    now: DateTime<Utc>,
) -> BookingResult<SessionBooking> {
    let session = fetch_session(pool, session_id).await?;
    let status = parse_status(&session.status)?;
    lifecycle::ensure_transition(status, SessionStatus::Cancelled)?;

    let updated = repositories::session::mark_cancelled(pool, session_id, reason, now)
        .await
        .map_err(BookingError::Database)?;

    let Some(row) = updated else {
        return Err(transition_conflict(pool, session_id, SessionStatus::Cancelled).await);
    };

    if let Some(slot_id) = row.time_slot_id {
        let slot = repositories::time_slot::get_time_slot_by_id(pool, slot_id)
            .await
            .map_err(BookingError::Database)?;
        if let Some(slot) = slot {
            if slot.start_time > now {
                repositories::time_slot::release_seat(pool, slot_id)
                    .await
                    .map_err(BookingError::Database)?;
            }
        }
    }

    tracing::info!("Session {} cancelled: {}", session_id, reason);
    row.into_domain().map_err(BookingError::Database)
}

/// The instant a session is expected to end: its slot's planned duration
/// from the actual start when delayed, otherwise the scheduled end.
pub async fn expected_end_of(
    pool: &PgPool,
    session: &DbSessionBooking,
) -> BookingResult<DateTime<Utc>> {
    let fallback = SessionTiming {
        scheduled_start: session.scheduled_at,
        planned_duration: Duration::minutes(session.duration_minutes as i64),
        is_delayed: session.is_delayed,
        manual_start_time: session.manual_start_time,
    };

    let timing = match session.time_slot_id {
        Some(slot_id) => repositories::time_slot::get_time_slot_by_id(pool, slot_id)
            .await
            .map_err(BookingError::Database)?
            .map(|slot| SessionTiming {
                scheduled_start: slot.start_time,
                planned_duration: slot.end_time - slot.start_time,
                is_delayed: session.is_delayed,
                manual_start_time: session.manual_start_time,
            })
            .unwrap_or(fallback),
        None => fallback,
    };

    Ok(lifecycle::expected_end(&timing))
}

async fn fetch_session(pool: &PgPool, session_id: Uuid) -> BookingResult<DbSessionBooking> {
    repositories::session::get_session_by_id(pool, session_id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| BookingError::NotFound(format!("Session with ID {} not found", session_id)))
}

fn parse_status(raw: &str) -> BookingResult<SessionStatus> {
    raw.parse().map_err(BookingError::Validation)
}

/// A guarded update matched nothing: report the transition that actually
/// failed based on the row's current state.
async fn transition_conflict(pool: &PgPool, session_id: Uuid, to: SessionStatus) -> BookingError {
    match repositories::session::get_session_by_id(pool, session_id).await {
        Ok(Some(row)) => match row.status.parse::<SessionStatus>() {
            Ok(from) => BookingError::InvalidStateTransition { from, to },
            Err(e) => BookingError::Validation(e),
        },
        Ok(None) => BookingError::NotFound(format!("Session with ID {} not found", session_id)),
        Err(e) => BookingError::Database(e),
    }
}
