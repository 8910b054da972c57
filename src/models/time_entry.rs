//! Time entry model and instant parsing.
//!
//! A [`TimeEntry`] is one clock-in / clock-out pair as delivered by the
//! timesheets data layer. The timestamps arrive as text and are parsed on
//! demand so that one bad record can be reported without failing a batch.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Naive timestamp layouts accepted when no offset is present.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Represents a single clock-in / clock-out record for an employee.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::TimeEntry;
///
/// let json = r#"{
///     "id": "te_001",
///     "user_id": "user_42",
///     "clock_in": "2026-01-15T19:00:00Z",
///     "clock_out": null
/// }"#;
///
/// let entry: TimeEntry = serde_json::from_str(json).unwrap();
/// assert!(entry.is_open());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Unique identifier for the entry.
    pub id: String,
    /// The employee this entry belongs to.
    pub user_id: String,
    /// The clock-in timestamp as received.
    pub clock_in: String,
    /// The clock-out timestamp, absent while the employee is still clocked in.
    #[serde(default)]
    pub clock_out: Option<String>,
}

impl TimeEntry {
    /// Returns true when the employee has not clocked out yet.
    ///
    /// A blank clock-out string counts as absent.
    pub fn is_open(&self) -> bool {
        self.clock_out
            .as_deref()
            .is_none_or(|value| value.trim().is_empty())
    }

    /// Parses the clock-in timestamp.
    ///
    /// Naive timestamps are interpreted in `default_offset`.
    pub fn clock_in_instant(&self, default_offset: FixedOffset) -> EngineResult<DateTime<FixedOffset>> {
        parse_instant("clock_in", &self.clock_in, default_offset)
    }

    /// Parses the clock-out timestamp, returning `None` for an open shift.
    pub fn clock_out_instant(
        &self,
        default_offset: FixedOffset,
    ) -> EngineResult<Option<DateTime<FixedOffset>>> {
        if self.is_open() {
            return Ok(None);
        }
        match self.clock_out.as_deref() {
            Some(raw) => parse_instant("clock_out", raw, default_offset).map(Some),
            None => Ok(None),
        }
    }
}

/// Parses a textual timestamp into an absolute instant.
///
/// Accepts RFC 3339 (`2026-01-15T19:00:00+10:00`, `2026-01-15T09:00:00Z`)
/// and naive `YYYY-MM-DDTHH:MM:SS` / `YYYY-MM-DD HH:MM:SS` forms with an
/// optional fractional second. Naive forms are placed in `default_offset`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] naming `field` when the value
/// matches none of the accepted forms.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::parse_instant;
/// use chrono::{FixedOffset, Timelike};
///
/// let utc = FixedOffset::east_opt(0).unwrap();
/// let instant = parse_instant("clock_in", "2026-01-15 19:00:00", utc).unwrap();
/// assert_eq!(instant.hour(), 19);
///
/// assert!(parse_instant("clock_in", "7 PM", utc).is_err());
/// ```
pub fn parse_instant(
    field: &str,
    raw: &str,
    default_offset: FixedOffset,
) -> EngineResult<DateTime<FixedOffset>> {
    let value = raw.trim();

    let rfc3339_error = match DateTime::parse_from_rfc3339(value) {
        Ok(instant) => return Ok(instant),
        Err(err) => err,
    };

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            if let Some(instant) = naive.and_local_timezone(default_offset).single() {
                return Ok(instant);
            }
        }
    }

    Err(EngineError::InvalidInput {
        field: field.to_string(),
        value: raw.to_string(),
        message: rfc3339_error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate, Timelike};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn make_entry(clock_in: &str, clock_out: Option<&str>) -> TimeEntry {
        TimeEntry {
            id: "te_001".to_string(),
            user_id: "user_1".to_string(),
            clock_in: clock_in.to_string(),
            clock_out: clock_out.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_rfc3339_keeps_offset() {
        let instant = parse_instant("clock_in", "2026-01-15T19:00:00+10:00", utc()).unwrap();
        assert_eq!(instant.offset().local_minus_utc(), 10 * 3600);
        assert_eq!(instant.hour(), 19);
    }

    #[test]
    fn test_parse_zulu() {
        let instant = parse_instant("clock_in", "2026-01-15T09:00:00Z", utc()).unwrap();
        assert_eq!(instant.date_naive(), NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
    }

    #[test]
    fn test_parse_naive_uses_default_offset() {
        let brisbane = FixedOffset::east_opt(10 * 3600).unwrap();
        let instant = parse_instant("clock_in", "2026-01-15T23:30:00", brisbane).unwrap();
        assert_eq!(instant.offset().local_minus_utc(), 10 * 3600);
        assert_eq!(instant.day(), 15);
        assert_eq!(instant.minute(), 30);
    }

    #[test]
    fn test_parse_naive_with_space_and_fraction() {
        let instant = parse_instant("clock_out", "2026-01-15 17:00:00.250", utc()).unwrap();
        assert_eq!(instant.hour(), 17);
        assert_eq!(instant.nanosecond(), 250_000_000);
    }

    #[test]
    fn test_parse_rejects_clock_string() {
        let err = parse_instant("clock_in", "9:27 AM", utc()).unwrap_err();
        match err {
            EngineError::InvalidInput { field, value, .. } => {
                assert_eq!(field, "clock_in");
                assert_eq!(value, "9:27 AM");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(parse_instant("clock_in", "", utc()).is_err());
    }

    #[test]
    fn test_blank_clock_out_is_open() {
        assert!(make_entry("2026-01-15T09:00:00Z", None).is_open());
        assert!(make_entry("2026-01-15T09:00:00Z", Some("  ")).is_open());
        assert!(!make_entry("2026-01-15T09:00:00Z", Some("2026-01-15T17:00:00Z")).is_open());
    }

    #[test]
    fn test_clock_out_instant_open_shift() {
        let entry = make_entry("2026-01-15T09:00:00Z", None);
        assert_eq!(entry.clock_out_instant(utc()).unwrap(), None);
    }

    #[test]
    fn test_clock_out_instant_invalid() {
        let entry = make_entry("2026-01-15T09:00:00Z", Some("later"));
        assert!(entry.clock_out_instant(utc()).is_err());
    }

    #[test]
    fn test_time_entry_deserialization_without_clock_out() {
        let json = r#"{
            "id": "te_007",
            "user_id": "user_9",
            "clock_in": "2026-01-15T19:00:00Z"
        }"#;

        let entry: TimeEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, "te_007");
        assert!(entry.clock_out.is_none());
        assert!(entry.is_open());
    }
}
