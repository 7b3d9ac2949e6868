//! # Datetime Normalizer
//!
//! Historical storage for this system accumulated timestamps in several
//! shapes: native datetimes, ISO-8601 strings (with and without offsets),
//! epoch milliseconds, and a legacy wrapped-object form
//! (`{"$date": "..."}` / `{"$date": {"$numberLong": "..."}}`). Every inbound
//! datetime is routed through [`normalize`] before it reaches the repository
//! boundary, so only native `DateTime<Utc>` values are ever persisted. The
//! `flexible` serde helpers apply the same normalization to DTO fields.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use crate::errors::{BookingError, BookingResult};

/// Converts any encountered timestamp representation into a canonical
/// `DateTime<Utc>`.
///
/// Fails with [`BookingError::Validation`] when the value is unparsable;
/// callers on read paths log and flag such records instead of defaulting.
pub fn normalize(raw: &Value) -> BookingResult<DateTime<Utc>> {
    match raw {
        Value::String(s) => parse_datetime_str(s),
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| BookingError::Validation(format!("non-integer timestamp: {}", n)))
            .and_then(from_epoch_millis),
        Value::Object(map) => {
            let inner = map.get("$date").ok_or_else(|| {
                BookingError::Validation("object is not a wrapped datetime".to_string())
            })?;
            match inner {
                Value::String(s) => parse_datetime_str(s),
                Value::Number(n) => n
                    .as_i64()
                    .ok_or_else(|| {
                        BookingError::Validation(format!("non-integer $date: {}", n))
                    })
                    .and_then(from_epoch_millis),
                Value::Object(wrapped) => {
                    let millis = wrapped
                        .get("$numberLong")
                        .and_then(Value::as_str)
                        .ok_or_else(|| {
                            BookingError::Validation("malformed $numberLong wrapper".to_string())
                        })?;
                    let millis = millis.parse::<i64>().map_err(|e| {
                        BookingError::Validation(format!("invalid $numberLong '{}': {}", millis, e))
                    })?;
                    from_epoch_millis(millis)
                }
                other => Err(BookingError::Validation(format!(
                    "unsupported $date payload: {}",
                    other
                ))),
            }
        }
        other => Err(BookingError::Validation(format!(
            "unsupported timestamp representation: {}",
            other
        ))),
    }
}

/// Parses an ISO-8601 / RFC-3339 string; bare timestamps without an offset
/// are read as UTC.
pub fn parse_datetime_str(s: &str) -> BookingResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc());
        }
    }

    Err(BookingError::Validation(format!(
        "unparsable datetime: '{}'",
        s
    )))
}

fn from_epoch_millis(millis: i64) -> BookingResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        BookingError::Validation(format!("epoch milliseconds out of range: {}", millis))
    })
}

/// Serde adapter for required datetime fields: serializes as RFC-3339 and
/// accepts any representation [`normalize`] understands.
pub mod flexible {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&dt.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        super::normalize(&value).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for optional datetime fields.
pub mod flexible_opt {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match dt {
            Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Null) | None => Ok(None),
            Some(value) => super::normalize(&value)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
