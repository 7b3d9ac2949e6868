//! Storage-enforced invariant tests that need a live Postgres. Ignored by
//! default; point `TEST_DATABASE_URL` at a scratch database and run with
//! `cargo test -- --ignored`.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use mentorsync_db::mock::create_test_pool;
use mentorsync_db::models::NewTimeSlot;
use mentorsync_db::repositories::time_slot;

fn slot(
    mentor_id: Uuid,
    start: DateTime<Utc>,
    max_students: i32,
    is_recurring: bool,
) -> NewTimeSlot {
    NewTimeSlot {
        mentor_id,
        start_time: start,
        end_time: start + Duration::hours(1),
        session_type: "YOGA".to_string(),
        max_students,
        is_recurring,
        recurring_days: if is_recurring {
            vec!["MONDAY".to_string()]
        } else {
            vec![]
        },
        price: 50_000,
        session_link: "https://meet.example.com/abc".to_string(),
        notes: None,
    }
}

/// Capacity is enforced by the conditional UPDATE itself: concurrent
/// claims against a single-seat slot get exactly one row back between
/// them, and the stored count never exceeds the capacity.
#[tokio::test]
#[ignore = "needs a live Postgres via TEST_DATABASE_URL"]
async fn test_concurrent_claims_on_single_seat_slot_admit_exactly_one() {
    let pool = create_test_pool().await;
    let start = Utc::now() + Duration::days(1);
    let row = time_slot::create_time_slot(&pool, &slot(Uuid::new_v4(), start, 1, false))
        .await
        .expect("slot insert should succeed");

    let mut handles = Vec::new();
    for _ in 0..4 {
        let pool = pool.clone();
        let slot_id = row.id;
        handles.push(tokio::spawn(async move {
            time_slot::try_reserve_seat(&pool, slot_id).await
        }));
    }

    let mut claimed = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap().is_some() {
            claimed += 1;
        }
    }
    assert_eq!(claimed, 1);

    let after = time_slot::get_time_slot_by_id(&pool, row.id)
        .await
        .unwrap()
        .expect("slot should still exist");
    assert_eq!(after.current_students, 1);
    assert!(after.is_booked);
}

/// Releasing the seat reopens the slot for exactly one more claim.
#[tokio::test]
#[ignore = "needs a live Postgres via TEST_DATABASE_URL"]
async fn test_released_seat_can_be_claimed_again() {
    let pool = create_test_pool().await;
    let start = Utc::now() + Duration::days(1);
    let row = time_slot::create_time_slot(&pool, &slot(Uuid::new_v4(), start, 1, false))
        .await
        .unwrap();

    assert!(time_slot::try_reserve_seat(&pool, row.id)
        .await
        .unwrap()
        .is_some());
    assert!(time_slot::try_reserve_seat(&pool, row.id)
        .await
        .unwrap()
        .is_none());

    let released = time_slot::release_seat(&pool, row.id)
        .await
        .unwrap()
        .expect("occupied slot should release");
    assert_eq!(released.current_students, 0);
    assert!(!released.is_booked);

    assert!(time_slot::try_reserve_seat(&pool, row.id)
        .await
        .unwrap()
        .is_some());
}

/// The prune predicate never matches a booked slot, however far in the
/// past it is; only expired unbooked recurring instances go.
#[tokio::test]
#[ignore = "needs a live Postgres via TEST_DATABASE_URL"]
async fn test_prune_deletes_expired_unbooked_but_never_booked() {
    let pool = create_test_pool().await;
    let expired = Utc::now() - Duration::days(2);

    let unbooked_a = time_slot::create_time_slot(&pool, &slot(Uuid::new_v4(), expired, 3, true))
        .await
        .unwrap();
    let unbooked_b = time_slot::create_time_slot(&pool, &slot(Uuid::new_v4(), expired, 3, true))
        .await
        .unwrap();
    let booked = time_slot::create_time_slot(&pool, &slot(Uuid::new_v4(), expired, 3, true))
        .await
        .unwrap();
    time_slot::try_reserve_seat(&pool, booked.id)
        .await
        .unwrap()
        .expect("booking the expired slot should succeed");

    let deleted = time_slot::delete_expired_unbooked(&pool, Utc::now())
        .await
        .unwrap();
    // The scratch database is shared across runs, so other expired residue
    // may be swept along with our two rows.
    assert!(deleted >= 2);

    assert!(time_slot::get_time_slot_by_id(&pool, unbooked_a.id)
        .await
        .unwrap()
        .is_none());
    assert!(time_slot::get_time_slot_by_id(&pool, unbooked_b.id)
        .await
        .unwrap()
        .is_none());

    let survivor = time_slot::get_time_slot_by_id(&pool, booked.id)
        .await
        .unwrap()
        .expect("booked slot must survive the prune");
    assert!(survivor.is_booked);
}
