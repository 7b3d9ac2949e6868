use crate::models::{DbTimeSlot, NewTimeSlot};
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_time_slot(pool: &Pool<Postgres>, slot: &NewTimeSlot) -> Result<DbTimeSlot> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let time_slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        INSERT INTO time_slots (
            id, mentor_id, start_time, end_time, session_type, max_students,
            current_students, is_recurring, recurring_days, price,
            session_link, notes, is_active, is_booked, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, 0, $7, $8, $9, $10, $11, TRUE, FALSE, $12, $12)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(slot.mentor_id)
    .bind(slot.start_time)
    .bind(slot.end_time)
    .bind(&slot.session_type)
    .bind(slot.max_students)
    .bind(slot.is_recurring)
    .bind(&slot.recurring_days)
    .bind(slot.price)
    .bind(&slot.session_link)
    .bind(&slot.notes)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(time_slot)
}

/// Inserts a generated slot instance unless one already exists for the same
/// `(mentor_id, start_time)` pair. Returns whether a row was created, which
/// is what makes repeated and concurrent generation runs idempotent.
pub async fn insert_slot_if_absent(pool: &Pool<Postgres>, slot: &NewTimeSlot) -> Result<bool> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO time_slots (
            id, mentor_id, start_time, end_time, session_type, max_students,
            current_students, is_recurring, recurring_days, price,
            session_link, notes, is_active, is_booked, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, 0, $7, $8, $9, $10, $11, TRUE, FALSE, $12, $12)
        ON CONFLICT (mentor_id, start_time) DO NOTHING
        "#,
    )
    .bind(id)
    .bind(slot.mentor_id)
    .bind(slot.start_time)
    .bind(slot.end_time)
    .bind(&slot.session_type)
    .bind(slot.max_students)
    .bind(slot.is_recurring)
    .bind(&slot.recurring_days)
    .bind(slot.price)
    .bind(&slot.session_link)
    .bind(&slot.notes)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

pub async fn get_time_slot_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbTimeSlot>> {
    let time_slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT * FROM time_slots WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(time_slot)
}

pub async fn get_slots_by_mentor_window(
    pool: &Pool<Postgres>,
    mentor_id: Uuid,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<DbTimeSlot>> {
    let time_slots = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT * FROM time_slots
        WHERE mentor_id = $1 AND start_time >= $2 AND start_time < $3
        ORDER BY start_time ASC
        "#,
    )
    .bind(mentor_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(time_slots)
}

/// The commit path's single conditional update: claims a seat only while
/// capacity remains, in one statement, so concurrent commits against the
/// last seat cannot both succeed. `None` means the slot was full, inactive,
/// or missing.
pub async fn try_reserve_seat(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbTimeSlot>> {
    let now = Utc::now();

    let time_slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        UPDATE time_slots
        SET current_students = current_students + 1,
            is_booked = TRUE,
            updated_at = $2
        WHERE id = $1
          AND is_active = TRUE
          AND current_students < max_students
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(time_slot)
}

/// Releases one seat (cancellation of a not-yet-started session), clearing
/// `is_booked` when the count drops to zero.
pub async fn release_seat(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbTimeSlot>> {
    let now = Utc::now();

    let time_slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        UPDATE time_slots
        SET current_students = current_students - 1,
            is_booked = current_students - 1 >= 1,
            updated_at = $2
        WHERE id = $1 AND current_students > 0
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(time_slot)
}

/// Prune step of the daily maintenance run. Booked slots are never deleted,
/// however far in the past they are; they remain as history for their
/// completed sessions.
pub async fn delete_expired_unbooked(pool: &Pool<Postgres>, now: DateTime<Utc>) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM time_slots
        WHERE is_recurring = TRUE
          AND start_time < $1
          AND is_booked = FALSE
        "#,
    )
    .bind(now)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Future recurring slots still active, used by the maintenance run to
/// reconstruct the distinct pattern templates to refill.
pub async fn get_active_recurring_slots(
    pool: &Pool<Postgres>,
    now: DateTime<Utc>,
) -> Result<Vec<DbTimeSlot>> {
    let time_slots = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT * FROM time_slots
        WHERE is_recurring = TRUE AND is_active = TRUE AND start_time > $1
        ORDER BY mentor_id, start_time ASC
        "#,
    )
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(time_slots)
}
