use chrono::{DateTime, Utc};
use eyre::{eyre, Result};
use mentorsync_core::models::session::SessionBooking;
use mentorsync_core::models::time_slot::TimeSlot;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Row model for `time_slots`. Enum-like columns are stored as their
/// SCREAMING_SNAKE_CASE names and parsed into core enums by
/// [`DbTimeSlot::into_domain`].
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimeSlot {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub session_type: String,
    pub max_students: i32,
    pub current_students: i32,
    pub is_recurring: bool,
    pub recurring_days: Vec<String>,
    pub price: i64,
    pub session_link: String,
    pub notes: Option<String>,
    pub is_active: bool,
    pub is_booked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbTimeSlot {
    pub fn into_domain(self) -> Result<TimeSlot> {
        let session_type = self
            .session_type
            .parse()
            .map_err(|e: String| eyre!(e))?;
        let recurring_days = self
            .recurring_days
            .iter()
            .map(|day| day.parse().map_err(|e: String| eyre!(e)))
            .collect::<Result<Vec<_>>>()?;

        Ok(TimeSlot {
            id: self.id,
            mentor_id: self.mentor_id,
            start_time: self.start_time,
            end_time: self.end_time,
            session_type,
            max_students: self.max_students,
            current_students: self.current_students,
            is_recurring: self.is_recurring,
            recurring_days,
            price: self.price,
            session_link: self.session_link,
            notes: self.notes,
            is_active: self.is_active,
            is_booked: self.is_booked,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Insert payload for a time slot; `id`, `created_at` and `updated_at` are
/// assigned by the repository.
#[derive(Debug, Clone)]
pub struct NewTimeSlot {
    pub mentor_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub session_type: String,
    pub max_students: i32,
    pub is_recurring: bool,
    pub recurring_days: Vec<String>,
    pub price: i64,
    pub session_link: String,
    pub notes: Option<String>,
}

/// Row model for `session_bookings`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSessionBooking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub mentor_id: Uuid,
    pub time_slot_id: Option<Uuid>,
    pub session_type: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: String,
    pub payment_status: String,
    pub is_delayed: bool,
    pub manual_start_time: Option<DateTime<Utc>>,
    pub actual_end_time: Option<DateTime<Utc>>,
    pub amount: i64,
    pub payment_order_id: Option<String>,
    pub payment_id: Option<String>,
    pub completion_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbSessionBooking {
    pub fn into_domain(self) -> Result<SessionBooking> {
        Ok(SessionBooking {
            id: self.id,
            user_id: self.user_id,
            mentor_id: self.mentor_id,
            time_slot_id: self.time_slot_id,
            session_type: self
                .session_type
                .parse()
                .map_err(|e: String| eyre!(e))?,
            scheduled_at: self.scheduled_at,
            duration_minutes: self.duration_minutes,
            status: self.status.parse().map_err(|e: String| eyre!(e))?,
            payment_status: self
                .payment_status
                .parse()
                .map_err(|e: String| eyre!(e))?,
            is_delayed: self.is_delayed,
            manual_start_time: self.manual_start_time,
            actual_end_time: self.actual_end_time,
            amount: self.amount,
            payment_order_id: self.payment_order_id,
            payment_id: self.payment_id,
            completion_reason: self.completion_reason,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Insert payload for a committed booking. Bookings are only created after
/// payment verification, so the payment fields are always present.
#[derive(Debug, Clone)]
pub struct NewSessionBooking {
    pub user_id: Uuid,
    pub mentor_id: Uuid,
    pub time_slot_id: Option<Uuid>,
    pub session_type: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub amount: i64,
    pub payment_order_id: String,
    pub payment_id: String,
}
