//! Timestamp parsing for price observations.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::ObservationError;

/// A timestamp with timezone (always UTC).
pub type Timestamp = DateTime<Utc>;

/// Naive datetime layouts accepted from the feed, read as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Get the current timestamp.
pub fn now() -> Timestamp {
    Utc::now()
}

/// Parse a feed timestamp.
///
/// Accepts RFC 3339 (`2023-08-29T07:10:40.000Z`), a naive datetime which is
/// taken as UTC, or a bare `YYYY-MM-DD` date at midnight UTC.
pub fn parse_timestamp(raw: &str) -> Result<Timestamp, ObservationError> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(ObservationError::InvalidTimestamp(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339() {
        let ts = parse_timestamp("2023-08-29T07:10:40.000Z").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2023, 8, 29, 7, 10, 40).unwrap());

        let offset = parse_timestamp("2023-08-29T09:10:40+02:00").unwrap();
        assert_eq!(offset, ts);
    }

    #[test]
    fn test_parse_naive_datetime_as_utc() {
        let ts = parse_timestamp("2023-08-29T07:10:40.5").unwrap();
        assert_eq!(ts.timestamp(), 1693293040);
        assert_eq!(ts.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_parse_bare_date() {
        let ts = parse_timestamp("2024-01-02").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_timestamp("yesterday"),
            Err(ObservationError::InvalidTimestamp(_))
        ));
        assert!(parse_timestamp("").is_err());
    }
}
