//! Serde adapter for optional timestamps.
//!
//! An unset timestamp travels as `""`. On input `""`, `null` and a missing
//! field all decode to `None`; anything else must be RFC 3339.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer, de};

pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(ts) => serializer.serialize_str(&ts.to_rfc3339()),
        None => serializer.serialize_str(""),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;

    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => DateTime::parse_from_rfc3339(text)
            .map(|ts| Some(ts.with_timezone(&Utc)))
            .map_err(|e| de::Error::custom(format!("invalid timestamp {text:?}: {e}"))),
    }
}
