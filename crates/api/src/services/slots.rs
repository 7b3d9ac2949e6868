//! SlotGenerator: turns a recurring weekly pattern into concrete slot rows
//! for the forward window, and creates one-off slots directly.

use chrono::{Duration, Utc};
use mentorsync_core::errors::{BookingError, BookingResult};
use mentorsync_core::models::time_slot::{
    CreateOneOffSlotRequest, CreateRecurringSlotsRequest, GenerationResponse, SlotWindowQuery,
    TimeSlot,
};
use mentorsync_core::scheduling;
use sqlx::PgPool;
use uuid::Uuid;

use mentorsync_db::models::NewTimeSlot;
use mentorsync_db::repositories;

/// Generates slot instances for every pattern day inside
/// `[today, today + window_days)`. Instants that already have a slot for
/// this mentor are skipped by the storage layer's idempotency key, so
/// repeated and overlapping runs create nothing extra.
pub async fn generate_recurring_slots(
    pool: &PgPool,
    config: &CreateRecurringSlotsRequest,
) -> BookingResult<GenerationResponse> {
    scheduling::validate_pattern(
        &config.recurring_days,
        config.start_time_of_day,
        config.end_time_of_day,
        config.max_students,
    )?;

    let duration = config.end_time_of_day - config.start_time_of_day;
    let now = Utc::now();
    let occurrences = scheduling::occurrences(
        &config.recurring_days,
        config.start_time_of_day,
        duration,
        now,
        config.window_days,
    );

    let recurring_days: Vec<String> = config
        .recurring_days
        .iter()
        .map(|day| day.to_string())
        .collect();

    let mut created = 0u64;
    for occurrence in occurrences {
        let slot = NewTimeSlot {
            mentor_id: config.mentor_id,
            start_time: occurrence.start,
            end_time: occurrence.end,
            session_type: config.session_type.to_string(),
            max_students: config.max_students,
            is_recurring: true,
            recurring_days: recurring_days.clone(),
            price: config.price,
            session_link: config.session_link.clone(),
            notes: config.notes.clone(),
        };

        if repositories::time_slot::insert_slot_if_absent(pool, &slot)
            .await
            .map_err(BookingError::Database)?
        {
            created += 1;
        }
    }

    tracing::info!(
        "Generated {} recurring slot(s) for mentor {}",
        created,
        config.mentor_id
    );

    Ok(GenerationResponse { created })
}

/// Creates a single non-recurring slot without any enumeration.
pub async fn create_one_off_slot(
    pool: &PgPool,
    request: &CreateOneOffSlotRequest,
) -> BookingResult<TimeSlot> {
    if request.end_time <= request.start_time {
        return Err(BookingError::Validation(
            "slot end time must be later than its start time".to_string(),
        ));
    }
    if request.max_students < 1 {
        return Err(BookingError::Validation(
            "max_students must be at least 1".to_string(),
        ));
    }

    let slot = NewTimeSlot {
        mentor_id: request.mentor_id,
        start_time: request.start_time,
        end_time: request.end_time,
        session_type: request.session_type.to_string(),
        max_students: request.max_students,
        is_recurring: false,
        recurring_days: Vec::new(),
        price: request.price,
        session_link: request.session_link.clone(),
        notes: request.notes.clone(),
    };

    let row = repositories::time_slot::create_time_slot(pool, &slot)
        .await
        .map_err(BookingError::Database)?;

    row.into_domain().map_err(BookingError::Database)
}

/// Lists a mentor's slots inside the requested window, defaulting to the
/// next 30 days.
pub async fn list_mentor_slots(
    pool: &PgPool,
    mentor_id: Uuid,
    query: &SlotWindowQuery,
) -> BookingResult<Vec<TimeSlot>> {
    let now = Utc::now();
    let from = query.from.unwrap_or(now);
    let to = query.to.unwrap_or(now + Duration::days(30));

    if to <= from {
        return Err(BookingError::Validation(
            "window end must be later than its start".to_string(),
        ));
    }

    let rows = repositories::time_slot::get_slots_by_mentor_window(pool, mentor_id, from, to)
        .await
        .map_err(BookingError::Database)?;

    rows.into_iter()
        .map(|row| row.into_domain().map_err(BookingError::Database))
        .collect()
}
