//! Date widening and narrowing at the form/wire boundary.
//!
//! Date inputs hold bare `YYYY-MM-DD` strings. The backend sends and accepts
//! full ISO-8601 timestamps, with or without an offset.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::error::CoreError;
use crate::types::Timestamp;

const DATE_FORMAT: &str = "%Y-%m-%d";
const NAIVE_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"];

/// Parse any accepted date or timestamp form into a UTC instant.
///
/// Bare dates resolve to midnight UTC; naive timestamps are taken as UTC.
fn parse_instant(value: &str) -> Option<Timestamp> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_TIMESTAMP_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Narrow a backend date or timestamp to its calendar date (UTC).
pub fn narrow_to_date(value: &str) -> Option<NaiveDate> {
    parse_instant(value).map(|ts| ts.date_naive())
}

/// Value to place in a date input: `YYYY-MM-DD`, or empty when unset or
/// unparseable.
pub fn date_input_value(value: Option<&str>) -> String {
    value
        .and_then(narrow_to_date)
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Format an instant the way the backend expects (`2000-01-01T00:00:00.000Z`).
pub fn format_timestamp(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Widen a typed calendar date to a full timestamp at midnight UTC.
pub fn date_to_timestamp(date: NaiveDate) -> String {
    match date.and_hms_opt(0, 0, 0) {
        Some(naive) => format_timestamp(naive.and_utc()),
        None => format!("{}T00:00:00.000Z", date.format(DATE_FORMAT)),
    }
}

/// Widen a draft date string for the wire.
///
/// Empty or whitespace-only input widens to `None` (serialized as `null`).
/// Anything non-empty that is not a date or timestamp is rejected.
pub fn widen_to_timestamp(field: &'static str, value: &str) -> Result<Option<String>, CoreError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_instant(value)
        .map(|ts| Some(format_timestamp(ts)))
        .ok_or_else(|| CoreError::InvalidDate {
            field,
            value: value.to_string(),
        })
}

/// Parse a draft date string into a calendar date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    narrow_to_date(value)
}

/// Human display form used on detail cards (`dd/mm/yyyy`).
pub fn display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
