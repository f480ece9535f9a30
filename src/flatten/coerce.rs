//! Lenient scalar coercion used while deserializing payload trees.
//!
//! Upstream payloads are loosely typed: numbers sometimes arrive as strings,
//! temperatures sometimes as a bare number and sometimes as a quantitative
//! value, and timestamps carry arbitrary UTC offsets. The helpers here accept
//! those variants and reject anything that contradicts the expected type.

use crate::types::payload::QuantitativeValue;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parses an ISO-8601 date-time into timezone-naive UTC.
///
/// Offsets are applied (`2025-12-30T13:00:00-05:00` becomes `18:00:00`).
/// Naive inputs are taken to be UTC already. A bare date maps to midnight.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// A JSON number, or a string holding one.
pub fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn float_from<E: de::Error>(value: Value) -> Result<Option<f64>, E> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| E::custom(format!("expected a numeric string, found {s:?}"))),
        Value::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| E::custom(format!("number {n} is not representable as f64"))),
        other => Err(E::custom(format!("expected a number, found {}", kind_of(&other)))),
    }
}

/// `Option<f64>` from a number, a numeric string, an empty string or null.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    float_from(Value::deserialize(deserializer)?)
}

/// `Option<i64>` from an integral number or an integral numeric string.
pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if let Some(i) = value.as_i64() {
        return Ok(Some(i));
    }
    match float_from::<D::Error>(value)? {
        None => Ok(None),
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(Some(f as i64)),
        Some(f) => Err(de::Error::custom(format!("expected an integer, found {f}"))),
    }
}

/// A quantitative value, or a plain number standing in for one (its unit
/// then comes from elsewhere in the payload).
pub(crate) fn lenient_quantity<'de, D>(
    deserializer: D,
) -> Result<Option<QuantitativeValue>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        object @ Value::Object(_) => QuantitativeValue::deserialize(object)
            .map(Some)
            .map_err(de::Error::custom),
        other => Ok(float_from::<D::Error>(other)?.map(|value| QuantitativeValue {
            value: Some(value),
            ..Default::default()
        })),
    }
}

/// `Option<NaiveDateTime>` from an ISO-8601 string or null.
pub(crate) fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => parse_timestamp(&s)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("unparseable timestamp {s:?}"))),
        other => Err(de::Error::custom(format!(
            "expected an ISO-8601 string, found {}",
            kind_of(&other)
        ))),
    }
}

/// Last `/`-separated segment of a resource URL, e.g. the station id of
/// `https://api.weather.gov/stations/KSFM`.
pub(crate) fn last_path_segment(url: &str) -> Option<String> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}
