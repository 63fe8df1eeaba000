//! Serde helpers for timestamp fields
//!
//! Terminals send times in three shapes, all normalized to Unix milliseconds:
//! - a JSON number (milliseconds)
//! - an RFC 3339 string (`2025-03-01T19:30:00Z`)
//! - a `datetime-local` string without zone (`2025-03-01T19:30`), read as UTC

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};

const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parse a timestamp string into Unix milliseconds
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    LOCAL_FORMATS.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(raw, fmt)
            .ok()
            .map(|naive| naive.and_utc().timestamp_millis())
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Float(f64),
    Text(String),
}

/// Deserialize an optional timestamp accepting number or string forms
pub fn option_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<RawTimestamp>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawTimestamp::Millis(ms)) => Ok(Some(ms)),
        Some(RawTimestamp::Float(ms)) if ms.is_finite() => Ok(Some(ms.round() as i64)),
        Some(RawTimestamp::Float(ms)) => {
            Err(D::Error::custom(format!("invalid timestamp: {}", ms)))
        }
        Some(RawTimestamp::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(RawTimestamp::Text(s)) => parse_timestamp(&s)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {}", s))),
    }
}

/// Deserialize a clearable timestamp for partial updates
///
/// Use with `#[serde(default)]`: absent stays `None`, `null` becomes
/// `Some(None)` (clear), a value becomes `Some(Some(ms))`.
pub fn nullable_millis<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    option_millis(deserializer).map(Some)
}
