//! SlotMaintainer: the daily job that keeps the rolling slot window
//! populated. Step 1 prunes expired, unbooked recurring instances; step 2
//! reconstructs each distinct recurring template still in play and re-runs
//! the generator for it, leaning on the generator's idempotency for
//! overlap safety.

use std::collections::HashMap;

use chrono::{NaiveTime, Utc};
use mentorsync_core::errors::{BookingError, BookingResult};
use mentorsync_core::models::maintenance::{MaintenanceReport, MentorFailure};
use mentorsync_core::models::time_slot::CreateRecurringSlotsRequest;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use mentorsync_db::models::DbTimeSlot;
use mentorsync_db::repositories;
use mentorsync_db::retry::with_retry;

use crate::services;

pub struct SlotMaintenanceJob {
    pool: PgPool,
    window_days: i64,
}

/// Identity of a recurring template: everything that defines the pattern,
/// none of what varies per instance.
#[derive(Debug, PartialEq, Eq, Hash)]
struct TemplateKey {
    mentor_id: Uuid,
    session_type: String,
    recurring_days: Vec<String>,
    start_time_of_day: NaiveTime,
    duration_minutes: i64,
    max_students: i32,
    price: i64,
    session_link: String,
}

impl SlotMaintenanceJob {
    pub fn new(pool: PgPool, window_days: i64) -> Self {
        Self { pool, window_days }
    }

    pub async fn run(&self) -> BookingResult<MaintenanceReport> {
        let now = Utc::now();
        let mut report = MaintenanceReport::default();

        // Step 1: prune. The predicate never matches a booked slot, so
        // history behind completed sessions survives.
        report.slots_deleted = with_retry("slot prune", || {
            repositories::time_slot::delete_expired_unbooked(&self.pool, now)
        })
        .await
        .map_err(BookingError::Database)?;

        // Step 2: refill every distinct surviving template.
        let slots = with_retry("recurring template scan", || {
            repositories::time_slot::get_active_recurring_slots(&self.pool, now)
        })
        .await
        .map_err(BookingError::Database)?;

        let templates = collect_templates(slots, self.window_days, &mut report);

        for template in templates {
            match services::slots::generate_recurring_slots(&self.pool, &template).await {
                Ok(outcome) => report.slots_generated += outcome.created,
                Err(error) => {
                    warn!(
                        "Refill failed for mentor {}: {}",
                        template.mentor_id, error
                    );
                    report.mentor_errors.push(MentorFailure {
                        mentor_id: template.mentor_id,
                        error: error.to_string(),
                    });
                }
            }
        }

        info!(
            "Slot maintenance complete: {} deleted, {} generated, {} mentor error(s)",
            report.slots_deleted,
            report.slots_generated,
            report.mentor_errors.len()
        );

        Ok(report)
    }
}

/// Groups concrete slot instances back into their generating templates.
/// A row that cannot be parsed (unknown session type or weekday name) is
/// reported against its mentor instead of aborting the run.
fn collect_templates(
    slots: Vec<DbTimeSlot>,
    window_days: i64,
    report: &mut MaintenanceReport,
) -> Vec<CreateRecurringSlotsRequest> {
    let mut templates: HashMap<TemplateKey, CreateRecurringSlotsRequest> = HashMap::new();

    for slot in slots {
        let mut recurring_days = slot.recurring_days.clone();
        recurring_days.sort();

        let duration = slot.end_time - slot.start_time;
        let start_time_of_day = slot.start_time.time();
        let key = TemplateKey {
            mentor_id: slot.mentor_id,
            session_type: slot.session_type.clone(),
            recurring_days,
            start_time_of_day,
            duration_minutes: duration.num_minutes(),
            max_students: slot.max_students,
            price: slot.price,
            session_link: slot.session_link.clone(),
        };

        if templates.contains_key(&key) {
            continue;
        }

        let session_type = match slot.session_type.parse() {
            Ok(session_type) => session_type,
            Err(error) => {
                report.mentor_errors.push(MentorFailure {
                    mentor_id: slot.mentor_id,
                    error,
                });
                continue;
            }
        };

        let days: Result<Vec<_>, String> = slot
            .recurring_days
            .iter()
            .map(|day| day.parse())
            .collect();
        let days = match days {
            Ok(days) => days,
            Err(error) => {
                report.mentor_errors.push(MentorFailure {
                    mentor_id: slot.mentor_id,
                    error,
                });
                continue;
            }
        };

        // Generated instances never cross midnight, so this cannot wrap.
        let end_time_of_day = start_time_of_day.overflowing_add_signed(duration).0;

        templates.insert(
            key,
            CreateRecurringSlotsRequest {
                mentor_id: slot.mentor_id,
                session_type,
                start_time_of_day,
                end_time_of_day,
                recurring_days: days,
                window_days,
                max_students: slot.max_students,
                price: slot.price,
                session_link: slot.session_link,
                notes: slot.notes,
            },
        );
    }

    templates.into_values().collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use mentorsync_core::models::time_slot::SessionType;
    use pretty_assertions::assert_eq;

    use super::*;

    fn instance(mentor_id: Uuid, day_offset: i64) -> DbTimeSlot {
        let start = Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap() + Duration::days(day_offset);
        DbTimeSlot {
            id: Uuid::new_v4(),
            mentor_id,
            start_time: start,
            end_time: start + Duration::hours(1),
            session_type: "YOGA".to_string(),
            max_students: 5,
            current_students: 0,
            is_recurring: true,
            recurring_days: vec!["MONDAY".to_string(), "WEDNESDAY".to_string()],
            price: 50_000,
            session_link: "https://meet.example.com/abc".to_string(),
            notes: None,
            is_active: true,
            is_booked: false,
            created_at: start,
            updated_at: start,
        }
    }

    #[test]
    fn test_instances_of_one_pattern_collapse_to_one_template() {
        let mentor_id = Uuid::new_v4();
        let mut report = MaintenanceReport::default();

        let templates = collect_templates(
            vec![instance(mentor_id, 0), instance(mentor_id, 2)],
            7,
            &mut report,
        );

        assert_eq!(templates.len(), 1);
        assert!(report.mentor_errors.is_empty());

        let template = &templates[0];
        assert_eq!(template.mentor_id, mentor_id);
        assert_eq!(template.session_type, SessionType::Yoga);
        assert_eq!(
            template.start_time_of_day,
            NaiveTime::from_hms_opt(10, 0, 0).unwrap()
        );
        assert_eq!(
            template.end_time_of_day,
            NaiveTime::from_hms_opt(11, 0, 0).unwrap()
        );
        assert_eq!(template.window_days, 7);
    }

    #[test]
    fn test_day_order_does_not_split_a_template() {
        let mentor_id = Uuid::new_v4();
        let mut shuffled = instance(mentor_id, 2);
        shuffled.recurring_days = vec!["WEDNESDAY".to_string(), "MONDAY".to_string()];
        let mut report = MaintenanceReport::default();

        let templates =
            collect_templates(vec![instance(mentor_id, 0), shuffled], 7, &mut report);

        assert_eq!(templates.len(), 1);
    }

    #[test]
    fn test_distinct_mentors_keep_distinct_templates() {
        let mut report = MaintenanceReport::default();

        let templates = collect_templates(
            vec![instance(Uuid::new_v4(), 0), instance(Uuid::new_v4(), 0)],
            7,
            &mut report,
        );

        assert_eq!(templates.len(), 2);
    }

    #[test]
    fn test_unparsable_row_is_reported_and_skipped() {
        let mentor_id = Uuid::new_v4();
        let mut broken = instance(mentor_id, 0);
        broken.session_type = "CROSSFIT".to_string();
        let other = instance(Uuid::new_v4(), 0);
        let mut report = MaintenanceReport::default();

        let templates = collect_templates(vec![broken, other.clone()], 7, &mut report);

        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].mentor_id, other.mentor_id);
        assert_eq!(report.mentor_errors.len(), 1);
        assert_eq!(report.mentor_errors[0].mentor_id, mentor_id);
    }
}
