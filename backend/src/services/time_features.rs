//! Calendar feature extraction from request timestamps.
//!
//! Timestamps are read as wall-clock time. When the string carries a UTC
//! offset the clock reading in that offset is used as-is; nothing is converted
//! to the server's zone.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::error::PredictionError;
use crate::models::TimeFeatures;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 style timestamp into a naive wall-clock datetime.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, PredictionError> {
    let trimmed = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_local());
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| PredictionError::InvalidTimestamp(raw.to_string()))
}

/// Decompose a timestamp into the model's time features.
pub fn extract(raw: &str) -> Result<TimeFeatures, PredictionError> {
    Ok(from_datetime(&parse_timestamp(raw)?))
}

/// Time features of an already-parsed datetime.
pub fn from_datetime(dt: &NaiveDateTime) -> TimeFeatures {
    let day_of_week = dt.weekday().num_days_from_monday();
    TimeFeatures {
        hour: dt.hour(),
        day_of_week,
        is_weekend: day_of_week >= 5,
        month: dt.month(),
    }
}
