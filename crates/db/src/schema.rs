use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create time_slots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS time_slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            mentor_id UUID NOT NULL,
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            session_type VARCHAR(32) NOT NULL,
            max_students INT NOT NULL,
            current_students INT NOT NULL DEFAULT 0,
            is_recurring BOOLEAN NOT NULL DEFAULT FALSE,
            recurring_days TEXT[] NOT NULL DEFAULT '{}',
            price BIGINT NOT NULL,
            session_link TEXT NOT NULL DEFAULT '',
            notes TEXT NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            is_booked BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time),
            CONSTRAINT valid_capacity CHECK (max_students >= 1),
            CONSTRAINT seats_within_capacity
                CHECK (current_students >= 0 AND current_students <= max_students)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create session_bookings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS session_bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id UUID NOT NULL,
            mentor_id UUID NOT NULL,
            time_slot_id UUID NULL REFERENCES time_slots(id),
            session_type VARCHAR(32) NOT NULL,
            scheduled_at TIMESTAMP WITH TIME ZONE NOT NULL,
            duration_minutes INT NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'SCHEDULED',
            payment_status VARCHAR(16) NOT NULL DEFAULT 'PENDING',
            is_delayed BOOLEAN NOT NULL DEFAULT FALSE,
            manual_start_time TIMESTAMP WITH TIME ZONE NULL,
            actual_end_time TIMESTAMP WITH TIME ZONE NULL,
            amount BIGINT NOT NULL,
            payment_order_id VARCHAR(255) NULL,
            payment_id VARCHAR(255) NULL,
            completion_reason TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_duration CHECK (duration_minutes > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Idempotency key for slot generation: one slot per mentor per instant.
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS ux_time_slots_mentor_start
            ON time_slots(mentor_id, start_time);
        "#,
    )
    .execute(pool)
    .await?;

    // At most one non-terminal paid booking per (user, mentor) pair.
    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS ux_active_session_per_pair
            ON session_bookings(user_id, mentor_id)
            WHERE status IN ('SCHEDULED', 'ONGOING')
              AND payment_status = 'COMPLETED';
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_time_slots_mentor_id ON time_slots(mentor_id);
        CREATE INDEX IF NOT EXISTS idx_time_slots_start_time ON time_slots(start_time);
        CREATE INDEX IF NOT EXISTS idx_time_slots_recurring
            ON time_slots(is_recurring, start_time);
        CREATE INDEX IF NOT EXISTS idx_session_bookings_status ON session_bookings(status);
        CREATE INDEX IF NOT EXISTS idx_session_bookings_user_mentor
            ON session_bookings(user_id, mentor_id);
        CREATE INDEX IF NOT EXISTS idx_session_bookings_time_slot
            ON session_bookings(time_slot_id);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
