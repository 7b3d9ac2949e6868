use chrono::{DateTime, Utc};
use mockall::mock;
use uuid::Uuid;

use crate::models::{DbSessionBooking, DbTimeSlot, NewSessionBooking, NewTimeSlot};

// Mock repositories for testing
mock! {
    pub TimeSlotRepo {
        pub async fn create_time_slot(&self, slot: NewTimeSlot) -> eyre::Result<DbTimeSlot>;

        pub async fn insert_slot_if_absent(&self, slot: NewTimeSlot) -> eyre::Result<bool>;

        pub async fn get_time_slot_by_id(&self, id: Uuid) -> eyre::Result<Option<DbTimeSlot>>;

        pub async fn get_slots_by_mentor_window(
            &self,
            mentor_id: Uuid,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> eyre::Result<Vec<DbTimeSlot>>;

        pub async fn try_reserve_seat(&self, id: Uuid) -> eyre::Result<Option<DbTimeSlot>>;

        pub async fn release_seat(&self, id: Uuid) -> eyre::Result<Option<DbTimeSlot>>;

        pub async fn delete_expired_unbooked(&self, now: DateTime<Utc>) -> eyre::Result<u64>;

        pub async fn get_active_recurring_slots(
            &self,
            now: DateTime<Utc>,
        ) -> eyre::Result<Vec<DbTimeSlot>>;
    }
}

mock! {
    pub SessionRepo {
        pub async fn create_session_booking(
            &self,
            booking: NewSessionBooking,
        ) -> eyre::Result<DbSessionBooking>;

        pub async fn get_session_by_id(&self, id: Uuid) -> eyre::Result<Option<DbSessionBooking>>;

        pub async fn find_active_booking(
            &self,
            user_id: Uuid,
            mentor_id: Uuid,
        ) -> eyre::Result<Option<DbSessionBooking>>;

        pub async fn mark_started(
            &self,
            id: Uuid,
            is_delayed: bool,
            manual_start_time: Option<DateTime<Utc>>,
            now: DateTime<Utc>,
        ) -> eyre::Result<Option<DbSessionBooking>>;

        pub async fn mark_completed(
            &self,
            id: Uuid,
            now: DateTime<Utc>,
            reason: Option<String>,
        ) -> eyre::Result<Option<DbSessionBooking>>;

        pub async fn mark_cancelled(
            &self,
            id: Uuid,
            reason: String,
            now: DateTime<Utc>,
        ) -> eyre::Result<Option<DbSessionBooking>>;

        pub async fn get_ongoing_sessions(&self) -> eyre::Result<Vec<DbSessionBooking>>;

        pub async fn get_scheduled_slot_sessions(&self) -> eyre::Result<Vec<DbSessionBooking>>;
    }
}
