use axum::http::StatusCode;
use axum::response::IntoResponse;
use rstest::rstest;

use mentorsync_api::middleware::error_handling::AppError;
use mentorsync_core::errors::BookingError;
use mentorsync_core::models::session::SessionStatus;

#[rstest]
#[case(BookingError::NotFound("missing".to_string()), StatusCode::NOT_FOUND)]
#[case(BookingError::Validation("bad input".to_string()), StatusCode::BAD_REQUEST)]
#[case(BookingError::Conflict("fully booked".to_string()), StatusCode::CONFLICT)]
#[case(
    BookingError::InvalidStateTransition {
        from: SessionStatus::Completed,
        to: SessionStatus::Ongoing,
    },
    StatusCode::CONFLICT
)]
#[case(
    BookingError::PaymentVerification("signature mismatch".to_string()),
    StatusCode::BAD_REQUEST
)]
#[case(
    BookingError::TransientStorage("pool timed out".to_string()),
    StatusCode::SERVICE_UNAVAILABLE
)]
#[case(
    BookingError::Database(eyre::eyre!("connection lost")),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_domain_errors_map_to_expected_status(
    #[case] error: BookingError,
    #[case] expected: StatusCode,
) {
    let response = AppError(error).into_response();
    assert_eq!(response.status(), expected);
}

#[test]
fn test_eyre_reports_become_internal_errors() {
    let error: AppError = eyre::eyre!("unexpected failure").into();
    let response = error.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
