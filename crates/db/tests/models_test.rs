use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use mentorsync_core::models::session::{PaymentStatus, SessionStatus};
use mentorsync_core::models::time_slot::{DayOfWeek, SessionType};
use mentorsync_db::models::{DbSessionBooking, DbTimeSlot};

fn sample_slot() -> DbTimeSlot {
    let now = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
    DbTimeSlot {
        id: Uuid::new_v4(),
        mentor_id: Uuid::new_v4(),
        start_time: Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap(),
        end_time: Utc.with_ymd_and_hms(2026, 3, 2, 11, 0, 0).unwrap(),
        session_type: "YOGA".to_string(),
        max_students: 5,
        current_students: 0,
        is_recurring: true,
        recurring_days: vec!["MONDAY".to_string(), "FRIDAY".to_string()],
        price: 50_000,
        session_link: "https://meet.example.com/abc".to_string(),
        notes: None,
        is_active: true,
        is_booked: false,
        created_at: now,
        updated_at: now,
    }
}

fn sample_booking() -> DbSessionBooking {
    let now = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
    DbSessionBooking {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        mentor_id: Uuid::new_v4(),
        time_slot_id: Some(Uuid::new_v4()),
        session_type: "MEDITATION".to_string(),
        scheduled_at: Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap(),
        duration_minutes: 60,
        status: "SCHEDULED".to_string(),
        payment_status: "COMPLETED".to_string(),
        is_delayed: false,
        manual_start_time: None,
        actual_end_time: None,
        amount: 75_000,
        payment_order_id: Some("order_123".to_string()),
        payment_id: Some("pay_456".to_string()),
        completion_reason: None,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn test_time_slot_row_maps_to_domain() {
    let row = sample_slot();
    let id = row.id;

    let slot = row.into_domain().expect("row should map cleanly");

    assert_eq!(slot.id, id);
    assert_eq!(slot.session_type, SessionType::Yoga);
    assert_eq!(
        slot.recurring_days,
        vec![DayOfWeek::Monday, DayOfWeek::Friday]
    );
}

#[test]
fn test_time_slot_row_with_unknown_session_type_fails() {
    let mut row = sample_slot();
    row.session_type = "CROSSFIT".to_string();

    assert!(row.into_domain().is_err());
}

#[test]
fn test_time_slot_row_with_unknown_weekday_fails() {
    let mut row = sample_slot();
    row.recurring_days = vec!["MONDAY".to_string(), "SOMEDAY".to_string()];

    assert!(row.into_domain().is_err());
}

#[test]
fn test_booking_row_maps_to_domain() {
    let row = sample_booking();
    let id = row.id;

    let booking = row.into_domain().expect("row should map cleanly");

    assert_eq!(booking.id, id);
    assert_eq!(booking.status, SessionStatus::Scheduled);
    assert_eq!(booking.payment_status, PaymentStatus::Completed);
    assert_eq!(booking.session_type, SessionType::Meditation);
}

#[test]
fn test_booking_row_with_unknown_status_fails() {
    let mut row = sample_booking();
    row.status = "PAUSED".to_string();

    assert!(row.into_domain().is_err());
}
