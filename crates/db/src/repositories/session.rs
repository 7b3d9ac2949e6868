use crate::models::{DbSessionBooking, NewSessionBooking};
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_session_booking(
    pool: &Pool<Postgres>,
    booking: &NewSessionBooking,
) -> Result<DbSessionBooking> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating session booking: id={}, user_id={}, mentor_id={}",
        id,
        booking.user_id,
        booking.mentor_id
    );

    let session = sqlx::query_as::<_, DbSessionBooking>(
        r#"
        INSERT INTO session_bookings (
            id, user_id, mentor_id, time_slot_id, session_type, scheduled_at,
            duration_minutes, status, payment_status, is_delayed, amount,
            payment_order_id, payment_id, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, 'SCHEDULED', 'COMPLETED', FALSE, $8, $9, $10, $11, $11)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(booking.user_id)
    .bind(booking.mentor_id)
    .bind(booking.time_slot_id)
    .bind(&booking.session_type)
    .bind(booking.scheduled_at)
    .bind(booking.duration_minutes)
    .bind(booking.amount)
    .bind(&booking.payment_order_id)
    .bind(&booking.payment_id)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(session)
}

pub async fn get_session_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbSessionBooking>> {
    let session = sqlx::query_as::<_, DbSessionBooking>(
        r#"
        SELECT * FROM session_bookings WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(session)
}

/// The non-terminal paid booking for a (user, mentor) pair, if one exists.
/// At most one can exist; the partial unique index enforces it.
pub async fn find_active_booking(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    mentor_id: Uuid,
) -> Result<Option<DbSessionBooking>> {
    let session = sqlx::query_as::<_, DbSessionBooking>(
        r#"
        SELECT * FROM session_bookings
        WHERE user_id = $1
          AND mentor_id = $2
          AND status IN ('SCHEDULED', 'ONGOING')
          AND payment_status = 'COMPLETED'
        "#,
    )
    .bind(user_id)
    .bind(mentor_id)
    .fetch_optional(pool)
    .await?;

    Ok(session)
}

/// Moves a session to ONGOING. The transition guard lives in the WHERE
/// clause: a session that is not SCHEDULED (or not paid) matches nothing and
/// `None` comes back, leaving the row untouched.
pub async fn mark_started(
    pool: &Pool<Postgres>,
    id: Uuid,
    is_delayed: bool,
    manual_start_time: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<Option<DbSessionBooking>> {
    let session = sqlx::query_as::<_, DbSessionBooking>(
        r#"
        UPDATE session_bookings
        SET status = 'ONGOING',
            is_delayed = $2,
            manual_start_time = $3,
            updated_at = $4
        WHERE id = $1
          AND status = 'SCHEDULED'
          AND payment_status = 'COMPLETED'
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(is_delayed)
    .bind(manual_start_time)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(session)
}

/// Completes an ONGOING session, recording when it actually ended. Repeated
/// calls (overlapping sweeps, sweep racing an explicit completion) match
/// nothing the second time.
pub async fn mark_completed(
    pool: &Pool<Postgres>,
    id: Uuid,
    now: DateTime<Utc>,
    reason: Option<&str>,
) -> Result<Option<DbSessionBooking>> {
    let session = sqlx::query_as::<_, DbSessionBooking>(
        r#"
        UPDATE session_bookings
        SET status = 'COMPLETED',
            actual_end_time = $2,
            completion_reason = COALESCE($3, completion_reason),
            updated_at = $2
        WHERE id = $1 AND status = 'ONGOING'
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(now)
    .bind(reason)
    .fetch_optional(pool)
    .await?;

    Ok(session)
}

pub async fn mark_cancelled(
    pool: &Pool<Postgres>,
    id: Uuid,
    reason: &str,
    now: DateTime<Utc>,
) -> Result<Option<DbSessionBooking>> {
    let session = sqlx::query_as::<_, DbSessionBooking>(
        r#"
        UPDATE session_bookings
        SET status = 'CANCELLED',
            completion_reason = $2,
            updated_at = $3
        WHERE id = $1 AND status IN ('SCHEDULED', 'ONGOING')
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(reason)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(session)
}

pub async fn get_ongoing_sessions(pool: &Pool<Postgres>) -> Result<Vec<DbSessionBooking>> {
    let sessions = sqlx::query_as::<_, DbSessionBooking>(
        r#"
        SELECT * FROM session_bookings
        WHERE status = 'ONGOING'
        ORDER BY scheduled_at ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(sessions)
}

/// Paid SCHEDULED sessions anchored to a slot, candidates for delayed
/// promotion by the sweep.
pub async fn get_scheduled_slot_sessions(
    pool: &Pool<Postgres>,
) -> Result<Vec<DbSessionBooking>> {
    let sessions = sqlx::query_as::<_, DbSessionBooking>(
        r#"
        SELECT * FROM session_bookings
        WHERE status = 'SCHEDULED'
          AND payment_status = 'COMPLETED'
          AND time_slot_id IS NOT NULL
        ORDER BY scheduled_at ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(sessions)
}
