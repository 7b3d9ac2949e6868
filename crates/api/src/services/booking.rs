//! BookingCoordinator: the payment-gated reservation path.
//!
//! `initiate_reservation` performs no database write, so an abandoned
//! payment cannot leak capacity. All enforcement happens at
//! `commit_reservation`, where the seat is claimed by a single conditional
//! update; a verified payment that loses that race is refunded, never
//! silently discarded.

use mentorsync_core::errors::{BookingError, BookingResult};
use mentorsync_core::models::session::{
    CommitReservationRequest, ReservationOffer, SessionBooking,
};
use sqlx::PgPool;
use uuid::Uuid;

use mentorsync_db::models::{DbTimeSlot, NewSessionBooking};
use mentorsync_db::repositories;

use crate::payment::PaymentGateway;

pub async fn initiate_reservation(
    pool: &PgPool,
    gateway: &dyn PaymentGateway,
    user_id: Uuid,
    time_slot_id: Uuid,
) -> BookingResult<ReservationOffer> {
    let slot = fetch_bookable_slot(pool, time_slot_id).await?;

    // Optimistic capacity check; the commit path re-enforces it atomically.
    if slot.current_students >= slot.max_students {
        return Err(BookingError::Conflict("fully booked".to_string()));
    }

    ensure_no_active_booking(pool, user_id, slot.mentor_id).await?;

    let receipt = format!("slot-{:x}", rand::random::<u64>());
    let order = gateway.create_order(slot.price, &receipt).await?;

    Ok(ReservationOffer {
        order_id: order.order_id,
        amount: order.amount,
        currency: order.currency,
    })
}

pub async fn commit_reservation(
    pool: &PgPool,
    gateway: &dyn PaymentGateway,
    request: &CommitReservationRequest,
) -> BookingResult<SessionBooking> {
    gateway.verify_signature(&request.order_id, &request.payment_id, &request.signature)?;

    let slot = fetch_bookable_slot(pool, request.time_slot_id).await?;
    ensure_no_active_booking(pool, request.user_id, slot.mentor_id).await?;

    // Single conditional update; not read-then-write. Under concurrent
    // commits at most max_students of them can get a row back.
    let reserved = repositories::time_slot::try_reserve_seat(pool, slot.id)
        .await
        .map_err(BookingError::Database)?;

    let Some(slot) = reserved else {
        refund_verified_payment(gateway, &request.payment_id, slot.price).await;
        return Err(BookingError::Conflict("fully booked".to_string()));
    };

    let duration_minutes = (slot.end_time - slot.start_time).num_minutes() as i32;
    let booking = NewSessionBooking {
        user_id: request.user_id,
        mentor_id: slot.mentor_id,
        time_slot_id: Some(slot.id),
        session_type: slot.session_type.clone(),
        scheduled_at: slot.start_time,
        duration_minutes,
        amount: slot.price,
        payment_order_id: request.order_id.clone(),
        payment_id: request.payment_id.clone(),
    };

    match repositories::session::create_session_booking(pool, &booking).await {
        Ok(row) => {
            // Notification collaborator is fire-and-forget; the log line is
            // the hook for it.
            tracing::info!(
                "Booking confirmed: session={}, user={}, mentor={}, slot={}",
                row.id,
                row.user_id,
                row.mentor_id,
                slot.id
            );
            row.into_domain().map_err(BookingError::Database)
        }
        Err(error) => {
            // Unwind the claimed seat and the captured payment before
            // surfacing anything.
            if let Err(release_error) =
                repositories::time_slot::release_seat(pool, slot.id).await
            {
                tracing::error!(
                    "Failed to release seat on slot {} after booking insert failure: {}",
                    slot.id,
                    release_error
                );
            }
            refund_verified_payment(gateway, &request.payment_id, slot.price).await;

            if is_active_booking_violation(&error) {
                Err(BookingError::Conflict(
                    "user already has an active session with this mentor".to_string(),
                ))
            } else {
                Err(BookingError::Database(error))
            }
        }
    }
}

async fn fetch_bookable_slot(pool: &PgPool, time_slot_id: Uuid) -> BookingResult<DbTimeSlot> {
    let slot = repositories::time_slot::get_time_slot_by_id(pool, time_slot_id)
        .await
        .map_err(BookingError::Database)?
        .ok_or_else(|| {
            BookingError::NotFound(format!("Time slot with ID {} not found", time_slot_id))
        })?;

    if !slot.is_active {
        return Err(BookingError::NotFound(format!(
            "Time slot with ID {} is not available",
            time_slot_id
        )));
    }

    Ok(slot)
}

async fn ensure_no_active_booking(
    pool: &PgPool,
    user_id: Uuid,
    mentor_id: Uuid,
) -> BookingResult<()> {
    let existing = repositories::session::find_active_booking(pool, user_id, mentor_id)
        .await
        .map_err(BookingError::Database)?;

    if let Some(session) = existing {
        return Err(BookingError::Conflict(format!(
            "user already has an active session ({}) with this mentor",
            session.id
        )));
    }

    Ok(())
}

async fn refund_verified_payment(gateway: &dyn PaymentGateway, payment_id: &str, amount: i64) {
    match gateway.refund(payment_id, amount).await {
        Ok(()) => tracing::info!("Refunded payment {} ({})", payment_id, amount),
        Err(error) => tracing::error!(
            "Refund of payment {} failed and needs manual follow-up: {}",
            payment_id,
            error
        ),
    }
}

/// True when the insert tripped the partial unique index guarding the
/// one-active-session-per-pair invariant.
fn is_active_booking_violation(report: &eyre::Report) -> bool {
    report
        .downcast_ref::<sqlx::Error>()
        .map_or(false, |error| match error {
            sqlx::Error::Database(db) => db.constraint() == Some("ux_active_session_per_pair"),
            _ => false,
        })
}
