//! Parsing of the event `datetime` field.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::CoreError;
use crate::types::EventDateTime;

/// Accepted local (offset-free) layouts, tried in order.
const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

pub const INVALID_DATETIME_MESSAGE: &str =
    "Invalid datetime format. Use ISO 8601 (e.g., 'YYYY-MM-DD HH:MM:SS').";

/// Parse an ISO-8601 date or date-time.
///
/// Accepts `T` or a space as separator, optional seconds and fractions, a
/// bare date (midnight), or an RFC 3339 value with an offset, which is
/// normalised to UTC.
pub fn parse_event_datetime(input: &str) -> Result<EventDateTime, CoreError> {
    let input = input.trim();

    for format in LOCAL_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(parsed);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight);
        }
    }

    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.naive_utc())
        .map_err(|_| CoreError::Validation(INVALID_DATETIME_MESSAGE.to_string()))
}
