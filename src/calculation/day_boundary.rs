//! Calendar boundary helpers.
//!
//! Midnight and week-start arithmetic shared by the split engine and the
//! weekly rollups. All instants carry a fixed offset, so a calendar day is
//! always exactly 24 hours long.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeDelta, Weekday};

use crate::error::{EngineError, EngineResult};

/// Returns the first instant of the calendar day after `instant`'s date,
/// in `instant`'s own offset.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] when the following day lies
/// outside chrono's representable range.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::next_midnight;
/// use chrono::DateTime;
///
/// let clock_in = DateTime::parse_from_rfc3339("2026-01-15T19:00:00+10:00").unwrap();
/// let midnight = next_midnight(clock_in).unwrap();
/// assert_eq!(midnight.to_rfc3339(), "2026-01-16T00:00:00+10:00");
/// ```
pub fn next_midnight(instant: DateTime<FixedOffset>) -> EngineResult<DateTime<FixedOffset>> {
    let out_of_range = || EngineError::InvalidInput {
        field: "clock_in".to_string(),
        value: instant.to_rfc3339(),
        message: "no following calendar day is representable".to_string(),
    };

    instant
        .date_naive()
        .succ_opt()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|naive| naive.and_local_timezone(*instant.offset()).single())
        .ok_or_else(out_of_range)
}

/// Returns the first date of the week containing `date`, for weeks that
/// begin on `week_start`.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::week_start_date;
/// use chrono::{NaiveDate, Weekday};
///
/// // 2026-01-15 is a Thursday
/// let thursday = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// assert_eq!(
///     week_start_date(thursday, Weekday::Mon),
///     NaiveDate::from_ymd_opt(2026, 1, 12).unwrap()
/// );
/// assert_eq!(
///     week_start_date(thursday, Weekday::Sun),
///     NaiveDate::from_ymd_opt(2026, 1, 11).unwrap()
/// );
/// ```
pub fn week_start_date(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let days_into_week = (7 + date.weekday().num_days_from_monday()
        - week_start.num_days_from_monday())
        % 7;
    date - TimeDelta::days(i64::from(days_into_week))
}
