//! Common validation utilities.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use validator::ValidationError;

/// Validates that a latitude value is within valid range (-90 to 90).
pub fn validate_latitude(lat: f64) -> Result<(), ValidationError> {
    if lat.is_finite() && (-90.0..=90.0).contains(&lat) {
        Ok(())
    } else {
        let mut err = ValidationError::new("latitude_range");
        err.message = Some("Latitude must be between -90 and 90".into());
        Err(err)
    }
}

/// Validates that a longitude value is within valid range (-180 to 180).
pub fn validate_longitude(lon: f64) -> Result<(), ValidationError> {
    if lon.is_finite() && (-180.0..=180.0).contains(&lon) {
        Ok(())
    } else {
        let mut err = ValidationError::new("longitude_range");
        err.message = Some("Longitude must be between -180 and 180".into());
        Err(err)
    }
}

/// Validates that a search distance (kilometers) is finite and non-negative.
pub fn validate_distance_km(distance: f64) -> Result<(), ValidationError> {
    if distance.is_finite() && distance >= 0.0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("distance_range");
        err.message = Some("Distance must be non-negative".into());
        Err(err)
    }
}

/// Coerces a raw query-string value into a finite float.
///
/// Returns `None` for anything that is not a plain finite number. "NaN" and
/// "Infinity" parse as floats but are rejected here on purpose: a proximity
/// query with either is a caller error, not a wildcard.
pub fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses an event date from any of the accepted write formats.
///
/// Accepted, in order of precedence:
/// 1. date-only `YYYY-MM-DD`
/// 2. RFC3339 / ISO-8601 datetime (with offset)
/// 3. ISO datetime without offset
/// 4. epoch milliseconds as a numeric string
///
/// All datetime forms are truncated to their UTC calendar date.
pub fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }

    if let Ok(millis) = raw.parse::<i64>() {
        return Utc
            .timestamp_millis_opt(millis)
            .single()
            .map(|dt| dt.date_naive());
    }

    None
}
