//! The periodic session sweep.
//!
//! Two passes: paid SCHEDULED sessions whose slot start has materially
//! passed without anyone pressing start are promoted to ONGOING as delayed,
//! and ONGOING sessions past their computed expected end are completed.
//! Both updates are guarded in SQL, so any sweep interval and overlapping
//! runs are safe: a no-match is counted as a no-op, not a failure.

use chrono::Utc;
use mentorsync_core::errors::{BookingError, BookingResult};
use mentorsync_core::lifecycle;
use mentorsync_core::models::maintenance::SweepReport;
use sqlx::PgPool;
use tracing::info;

use mentorsync_db::repositories;
use mentorsync_db::retry::with_retry;

use crate::services;

const AUTO_COMPLETE_REASON: &str = "auto-completed: planned duration elapsed";

pub struct SessionSweepJob {
    pool: PgPool,
}

impl SessionSweepJob {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn run(&self) -> BookingResult<SweepReport> {
        let now = Utc::now();
        let mut report = SweepReport::default();

        // Pass 1: delayed promotion. No manual start instant exists, so the
        // session keeps its scheduled timing and completes at slot end.
        let scheduled = with_retry("scheduled session scan", || {
            repositories::session::get_scheduled_slot_sessions(&self.pool)
        })
        .await
        .map_err(BookingError::Database)?;

        for session in scheduled {
            let Some(slot_id) = session.time_slot_id else {
                continue;
            };

            let slot = match repositories::time_slot::get_time_slot_by_id(&self.pool, slot_id).await
            {
                Ok(slot) => slot,
                Err(error) => {
                    report
                        .errors
                        .push(format!("slot lookup for session {}: {}", session.id, error));
                    continue;
                }
            };

            let Some(slot) = slot else { continue };
            if !lifecycle::is_materially_late(slot.start_time, now) {
                continue;
            }

            match repositories::session::mark_started(&self.pool, session.id, true, None, now)
                .await
            {
                Ok(Some(_)) => report.sessions_started += 1,
                // Lost to an explicit start or a cancellation; nothing to do.
                Ok(None) => {}
                Err(error) => report
                    .errors
                    .push(format!("promote session {}: {}", session.id, error)),
            }
        }

        // Pass 2: completion of sessions past their expected end.
        let ongoing = with_retry("ongoing session scan", || {
            repositories::session::get_ongoing_sessions(&self.pool)
        })
        .await
        .map_err(BookingError::Database)?;

        for session in ongoing {
            let expected_end = match services::lifecycle::expected_end_of(&self.pool, &session)
                .await
            {
                Ok(expected_end) => expected_end,
                Err(error) => {
                    report
                        .errors
                        .push(format!("expected end of session {}: {}", session.id, error));
                    continue;
                }
            };

            if now < expected_end {
                continue;
            }

            match repositories::session::mark_completed(
                &self.pool,
                session.id,
                now,
                Some(AUTO_COMPLETE_REASON),
            )
            .await
            {
                Ok(Some(_)) => report.sessions_completed += 1,
                // Already completed by the mentor or a concurrent sweep.
                Ok(None) => {}
                Err(error) => report
                    .errors
                    .push(format!("complete session {}: {}", session.id, error)),
            }
        }

        info!(
            "Session sweep complete: {} started, {} completed, {} error(s)",
            report.sessions_started,
            report.sessions_completed,
            report.errors.len()
        );

        Ok(report)
    }
}
