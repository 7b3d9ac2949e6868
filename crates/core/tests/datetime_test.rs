use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

use mentorsync_core::datetime::{normalize, parse_datetime_str};
use mentorsync_core::errors::BookingError;

#[test]
fn test_rfc3339_string_with_offset() {
    let parsed = normalize(&json!("2026-03-02T10:00:00+05:30")).unwrap();
    assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 3, 2, 4, 30, 0).unwrap());
}

#[rstest]
#[case("2026-03-02T10:00:00")]
#[case("2026-03-02 10:00:00")]
#[case("2026-03-02T10:00:00.000")]
fn test_bare_timestamps_read_as_utc(#[case] raw: &str) {
    let parsed = parse_datetime_str(raw).unwrap();
    assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap());
}

#[test]
fn test_epoch_milliseconds() {
    let expected = Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap();
    let parsed = normalize(&json!(expected.timestamp_millis())).unwrap();
    assert_eq!(parsed, expected);
}

#[test]
fn test_wrapped_string_form() {
    let parsed = normalize(&json!({"$date": "2026-03-02T10:00:00Z"})).unwrap();
    assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap());
}

#[test]
fn test_wrapped_number_long_form() {
    let expected = Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap();
    let millis = expected.timestamp_millis().to_string();
    let parsed = normalize(&json!({"$date": {"$numberLong": millis}})).unwrap();
    assert_eq!(parsed, expected);
}

#[test]
fn test_normalization_is_idempotent_on_canonical_output() {
    let original = normalize(&json!("2026-03-02T10:00:00+05:30")).unwrap();
    let again = normalize(&json!(original.to_rfc3339())).unwrap();
    assert_eq!(again, original);
}

#[rstest]
#[case(json!("not a date"))]
#[case(json!("2026-13-45T99:00:00Z"))]
#[case(json!({"wrapped": "2026-03-02T10:00:00Z"}))]
#[case(json!({"$date": {"$numberLong": "not-a-number"}}))]
#[case(json!(true))]
#[case(json!(["2026-03-02T10:00:00Z"]))]
fn test_unparsable_values_are_rejected(#[case] raw: serde_json::Value) {
    let result = normalize(&raw);
    assert!(matches!(result, Err(BookingError::Validation(_))));
}

#[test]
fn test_fractional_epoch_is_rejected() {
    let result = normalize(&json!(1766311200000.5));
    assert!(matches!(result, Err(BookingError::Validation(_))));
}
