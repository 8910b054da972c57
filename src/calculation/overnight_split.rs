//! Overnight shift splitting.
//!
//! This module attributes a completed shift's hours to calendar days. A shift
//! is cut at the first midnight after clock-in: hours before it belong to the
//! clock-in date, hours after it carry into the next date. A clock-out that is
//! not after the clock-in is read as a clock-out on the following day.

use chrono::{DateTime, FixedOffset, Offset, TimeDelta, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{SplitResult, TimeEntry, duration_to_hours};

use super::day_boundary::next_midnight;

/// Default number of decimal places for displayed hour totals.
pub const DEFAULT_DISPLAY_DECIMAL_PLACES: u32 = 2;

/// Settings that shape how shifts are split.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::SplitPolicy;
///
/// let policy = SplitPolicy::default();
/// assert!(policy.reporting_offset.is_none());
/// assert_eq!(policy.display_decimal_places, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitPolicy {
    /// Offset used to decide calendar dates. When `None`, each shift uses
    /// its clock-in's own offset.
    pub reporting_offset: Option<FixedOffset>,
    /// Longest plausible shift; longer shifts are rejected as malformed.
    pub max_shift_hours: Option<Decimal>,
    /// Decimal places used when rounding hours for display.
    pub display_decimal_places: u32,
}

impl Default for SplitPolicy {
    fn default() -> Self {
        Self {
            reporting_offset: None,
            max_shift_hours: None,
            display_decimal_places: DEFAULT_DISPLAY_DECIMAL_PLACES,
        }
    }
}

impl SplitPolicy {
    /// The offset naive timestamps are placed in (UTC when none is configured).
    pub fn default_offset(&self) -> FixedOffset {
        self.reporting_offset.unwrap_or_else(|| Utc.fix())
    }

    /// Rounds hours to the display precision, halves away from zero.
    pub fn round_hours(&self, hours: Decimal) -> Decimal {
        hours.round_dp_with_strategy(
            self.display_decimal_places,
            RoundingStrategy::MidpointAwayFromZero,
        )
    }
}

/// Splits a shift into the hours worked before and after midnight.
///
/// # Arguments
///
/// * `clock_in` - When the shift started
/// * `clock_out` - When the shift ended, or `None` while still clocked in
/// * `policy` - The reporting offset, plausibility limit and display precision
///
/// # Returns
///
/// * `Ok(None)` for an open shift; no hours are attributed.
/// * `Ok(Some(result))` for a completed shift.
///
/// # Behavior
///
/// - A clock-out at or before the clock-in is moved forward 24 hours
/// - The boundary is 00:00 on the day after the clock-in date
/// - A shift ending exactly at midnight is not overnight
/// - `start_day_hours + carry_next_day_hours` equals the elapsed time
///
/// # Errors
///
/// Returns [`EngineError::MalformedShift`] when the clock-out is still not
/// after the clock-in once rolled over, or when the shift is longer than
/// `policy.max_shift_hours`.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::{compute_shift_split, SplitPolicy};
/// use chrono::{DateTime, NaiveDate};
/// use rust_decimal::Decimal;
///
/// let clock_in = DateTime::parse_from_rfc3339("2026-01-15T19:00:00+00:00").unwrap();
/// let clock_out = DateTime::parse_from_rfc3339("2026-01-16T07:00:00+00:00").unwrap();
///
/// let split = compute_shift_split(clock_in, Some(clock_out), &SplitPolicy::default())
///     .unwrap()
///     .unwrap();
///
/// assert_eq!(split.start_day_hours, Decimal::from(5));
/// assert_eq!(split.carry_next_day_hours, Decimal::from(7));
/// assert_eq!(split.full_shift_hours, Decimal::from(12));
/// assert!(split.is_overnight);
/// assert_eq!(split.next_day_date, NaiveDate::from_ymd_opt(2026, 1, 16));
/// ```
pub fn compute_shift_split(
    clock_in: DateTime<FixedOffset>,
    clock_out: Option<DateTime<FixedOffset>>,
    policy: &SplitPolicy,
) -> EngineResult<Option<SplitResult>> {
    let Some(clock_out) = clock_out else {
        debug!(clock_in = %clock_in, "Open shift, no hours attributed");
        return Ok(None);
    };

    // Day attribution happens in one offset for both ends of the shift.
    let offset = policy.reporting_offset.unwrap_or(*clock_in.offset());
    let clock_in = clock_in.with_timezone(&offset);
    let recorded_out = clock_out.with_timezone(&offset);

    let rolled_over = recorded_out <= clock_in;
    let effective_clock_out = if rolled_over {
        recorded_out + TimeDelta::days(1)
    } else {
        recorded_out
    };

    if effective_clock_out <= clock_in {
        return Err(malformed(
            clock_in,
            recorded_out,
            "clock-out precedes clock-in by 24 hours or more",
        ));
    }

    let elapsed = effective_clock_out - clock_in;
    if let Some(max_hours) = policy.max_shift_hours {
        let elapsed_hours = duration_to_hours(elapsed);
        if elapsed_hours > max_hours {
            return Err(malformed(
                clock_in,
                recorded_out,
                &format!(
                    "shift of {} hours exceeds the {} hour maximum",
                    policy.round_hours(elapsed_hours),
                    max_hours
                ),
            ));
        }
    }

    let midnight = next_midnight(clock_in)?;

    let start_day_duration = (effective_clock_out.min(midnight) - clock_in).max(TimeDelta::zero());
    let carry_duration = (effective_clock_out - midnight).max(TimeDelta::zero());

    let start_day_hours = duration_to_hours(start_day_duration);
    let carry_next_day_hours = duration_to_hours(carry_duration);
    let is_overnight = carry_duration > TimeDelta::zero();

    let result = SplitResult {
        clock_in,
        effective_clock_out,
        rolled_over,
        start_date: clock_in.date_naive(),
        start_day_hours,
        carry_next_day_hours,
        full_shift_hours: policy.round_hours(start_day_hours + carry_next_day_hours),
        is_overnight,
        next_day_date: is_overnight.then(|| midnight.date_naive()),
        start_day_duration,
        carry_duration,
    };

    debug!(
        clock_in = %result.clock_in,
        clock_out = %result.effective_clock_out,
        rolled_over,
        start_day_hours = %result.start_day_hours,
        carry_next_day_hours = %result.carry_next_day_hours,
        "Split shift at midnight"
    );

    Ok(Some(result))
}

/// Parses a [`TimeEntry`]'s timestamps and splits it.
///
/// Naive timestamps are read in the policy's reporting offset (UTC when
/// none is configured).
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] if `clock_in`, or a non-blank
/// `clock_out`, is not a valid instant, and the errors of
/// [`compute_shift_split`] otherwise.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::{split_entry, SplitPolicy};
/// use timesheet_engine::models::TimeEntry;
/// use rust_decimal::Decimal;
///
/// let entry = TimeEntry {
///     id: "te_001".to_string(),
///     user_id: "user_1".to_string(),
///     clock_in: "2026-01-15 09:00:00".to_string(),
///     clock_out: Some("2026-01-15 17:00:00".to_string()),
/// };
///
/// let split = split_entry(&entry, &SplitPolicy::default()).unwrap().unwrap();
/// assert_eq!(split.full_shift_hours, Decimal::from(8));
/// assert!(!split.is_overnight);
/// ```
pub fn split_entry(entry: &TimeEntry, policy: &SplitPolicy) -> EngineResult<Option<SplitResult>> {
    let offset = policy.default_offset();
    let clock_in = entry.clock_in_instant(offset)?;
    let clock_out = entry.clock_out_instant(offset)?;
    compute_shift_split(clock_in, clock_out, policy)
}

fn malformed(
    clock_in: DateTime<FixedOffset>,
    clock_out: DateTime<FixedOffset>,
    message: &str,
) -> EngineError {
    EngineError::MalformedShift {
        clock_in: clock_in.to_rfc3339(),
        clock_out: clock_out.to_rfc3339(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn instant(value: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(value).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn split(clock_in: &str, clock_out: &str) -> SplitResult {
        compute_shift_split(
            instant(clock_in),
            Some(instant(clock_out)),
            &SplitPolicy::default(),
        )
        .unwrap()
        .unwrap()
    }

    fn assert_parts_sum_to_elapsed(result: &SplitResult) {
        let tolerance = dec("0.000001");
        assert!((result.total_hours() - result.elapsed_hours()).abs() < tolerance);
        assert!((result.total_hours() - result.full_shift_hours).abs() < dec("0.005"));
    }

    // ==========================================================================
    // OVS-001: Same-day shift
    // ==========================================================================
    #[test]
    fn test_ovs_001_same_day_shift() {
        let result = split("2026-01-15T09:00:00+00:00", "2026-01-15T17:00:00+00:00");

        assert_eq!(result.start_day_hours, dec("8.0"));
        assert_eq!(result.carry_next_day_hours, Decimal::ZERO);
        assert_eq!(result.full_shift_hours, dec("8.0"));
        assert!(!result.is_overnight);
        assert!(!result.rolled_over);
        assert_eq!(result.next_day_date, None);
        assert_eq!(result.start_date, make_date("2026-01-15"));
        assert_parts_sum_to_elapsed(&result);
    }

    // ==========================================================================
    // OVS-002: 7 PM to 7 AM overnight shift
    // ==========================================================================
    #[test]
    fn test_ovs_002_overnight_shift() {
        let result = split("2026-01-15T19:00:00+00:00", "2026-01-16T07:00:00+00:00");

        assert_eq!(result.start_day_hours, dec("5.0"));
        assert_eq!(result.carry_next_day_hours, dec("7.0"));
        assert_eq!(result.full_shift_hours, dec("12.0"));
        assert!(result.is_overnight);
        assert!(!result.rolled_over);
        assert_eq!(result.next_day_date, Some(make_date("2026-01-16")));
        assert_parts_sum_to_elapsed(&result);
    }

    // ==========================================================================
    // OVS-003: Clock-out recorded on the clock-in date rolls into the next day
    // ==========================================================================
    #[test]
    fn test_ovs_003_rollover_of_same_date_clock_out() {
        let result = split("2026-01-15T19:00:00+00:00", "2026-01-15T07:00:00+00:00");

        assert!(result.rolled_over);
        assert_eq!(result.effective_clock_out, instant("2026-01-16T07:00:00+00:00"));
        assert_eq!(result.start_day_hours, dec("5.0"));
        assert_eq!(result.carry_next_day_hours, dec("7.0"));
        assert_eq!(result.full_shift_hours, dec("12.0"));
        assert_eq!(result.next_day_date, Some(make_date("2026-01-16")));
    }

    // ==========================================================================
    // OVS-004: Ending exactly at midnight does not carry
    // ==========================================================================
    #[test]
    fn test_ovs_004_exact_midnight_clock_out() {
        let result = split("2026-01-15T20:00:00+00:00", "2026-01-16T00:00:00+00:00");

        assert_eq!(result.start_day_hours, dec("4.0"));
        assert_eq!(result.carry_next_day_hours, Decimal::ZERO);
        assert_eq!(result.full_shift_hours, dec("4.0"));
        assert!(!result.is_overnight);
        assert_eq!(result.next_day_date, None);
        assert_eq!(result.day_portions().len(), 1);
    }

    #[test]
    fn test_midnight_clock_out_recorded_on_clock_in_date() {
        // "00:00" stored against the clock-in date rolls to the next midnight
        let result = split("2026-01-15T20:00:00+00:00", "2026-01-15T00:00:00+00:00");

        assert!(result.rolled_over);
        assert_eq!(result.start_day_hours, dec("4.0"));
        assert!(!result.is_overnight);
    }

    // ==========================================================================
    // OVS-005: Open shift attributes nothing
    // ==========================================================================
    #[test]
    fn test_ovs_005_open_shift() {
        let result = compute_shift_split(
            instant("2026-01-15T19:00:00+00:00"),
            None,
            &SplitPolicy::default(),
        )
        .unwrap();
        assert!(result.is_none());
    }

    // ==========================================================================
    // OVS-006: Clock-out one hour "before" clock-in reads as a 23 hour shift
    // ==========================================================================
    #[test]
    fn test_ovs_006_earlier_clock_out_same_day_rolls_over() {
        let result = split("2026-01-15T09:00:00+00:00", "2026-01-15T08:00:00+00:00");

        assert!(result.rolled_over);
        assert_eq!(result.start_day_hours, dec("15.0"));
        assert_eq!(result.carry_next_day_hours, dec("8.0"));
        assert_eq!(result.full_shift_hours, dec("23.0"));
    }

    #[test]
    fn test_max_shift_hours_rejects_implausible_rollover() {
        let policy = SplitPolicy {
            max_shift_hours: Some(dec("16")),
            ..SplitPolicy::default()
        };
        let err = compute_shift_split(
            instant("2026-01-15T09:00:00+00:00"),
            Some(instant("2026-01-15T08:00:00+00:00")),
            &policy,
        )
        .unwrap_err();

        assert_eq!(err.code(), "MALFORMED_SHIFT");
        assert!(err.to_string().contains("exceeds the 16 hour maximum"));
    }

    #[test]
    fn test_max_shift_hours_allows_shift_at_limit() {
        let policy = SplitPolicy {
            max_shift_hours: Some(dec("12")),
            ..SplitPolicy::default()
        };
        let result = compute_shift_split(
            instant("2026-01-15T19:00:00+00:00"),
            Some(instant("2026-01-16T07:00:00+00:00")),
            &policy,
        )
        .unwrap()
        .unwrap();
        assert_eq!(result.full_shift_hours, dec("12"));
    }

    // ==========================================================================
    // OVS-007: Clock-out a day or more before clock-in is malformed
    // ==========================================================================
    #[test]
    fn test_ovs_007_clock_out_days_before_is_malformed() {
        let err = compute_shift_split(
            instant("2026-01-15T09:00:00+00:00"),
            Some(instant("2026-01-13T17:00:00+00:00")),
            &SplitPolicy::default(),
        )
        .unwrap_err();

        match err {
            EngineError::MalformedShift {
                clock_in,
                clock_out,
                ..
            } => {
                assert_eq!(clock_in, "2026-01-15T09:00:00+00:00");
                assert_eq!(clock_out, "2026-01-13T17:00:00+00:00");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_clock_out_exactly_one_day_before_is_malformed() {
        let err = compute_shift_split(
            instant("2026-01-15T09:00:00+00:00"),
            Some(instant("2026-01-14T09:00:00+00:00")),
            &SplitPolicy::default(),
        )
        .unwrap_err();
        assert_eq!(err.code(), "MALFORMED_SHIFT");
    }

    #[test]
    fn test_equal_clock_in_and_out_rolls_to_full_day() {
        let result = split("2026-01-15T09:00:00+00:00", "2026-01-15T09:00:00+00:00");

        assert!(result.rolled_over);
        assert_eq!(result.start_day_hours, dec("15"));
        assert_eq!(result.carry_next_day_hours, dec("9"));
        assert_eq!(result.full_shift_hours, dec("24"));
    }

    #[test]
    fn test_shift_longer_than_a_day_carries_remainder() {
        let result = split("2026-01-15T09:00:00+00:00", "2026-01-16T15:00:00+00:00");

        assert_eq!(result.start_day_hours, dec("15"));
        assert_eq!(result.carry_next_day_hours, dec("15"));
        assert_eq!(result.next_day_date, Some(make_date("2026-01-16")));
        assert_parts_sum_to_elapsed(&result);
    }

    #[test]
    fn test_clock_in_at_midnight_stays_on_start_day() {
        let result = split("2026-01-16T00:00:00+00:00", "2026-01-16T06:30:00+00:00");

        assert_eq!(result.start_date, make_date("2026-01-16"));
        assert_eq!(result.start_day_hours, dec("6.5"));
        assert!(!result.is_overnight);
    }

    #[test]
    fn test_full_shift_hours_rounded_to_two_places() {
        let result = split("2026-01-15T09:00:00+00:00", "2026-01-15T09:20:00+00:00");

        assert_eq!(result.full_shift_hours, dec("0.33"));
        assert!(result.start_day_hours > dec("0.3333"));
        assert_parts_sum_to_elapsed(&result);
    }

    #[test]
    fn test_half_hundredth_rounds_up() {
        // 7m30s is exactly 0.125 hours
        let result = split("2026-01-15T09:00:00+00:00", "2026-01-15T09:07:30+00:00");

        assert_eq!(result.start_day_hours, dec("0.125"));
        assert_eq!(result.full_shift_hours, dec("0.13"));
        assert_eq!(SplitPolicy::default().round_hours(dec("0.375")), dec("0.38"));
    }

    #[test]
    fn test_display_decimal_places_configurable() {
        let policy = SplitPolicy {
            display_decimal_places: 1,
            ..SplitPolicy::default()
        };
        let result = compute_shift_split(
            instant("2026-01-15T09:00:00+00:00"),
            Some(instant("2026-01-15T09:20:00+00:00")),
            &policy,
        )
        .unwrap()
        .unwrap();
        assert_eq!(result.full_shift_hours, dec("0.3"));
    }

    #[test]
    fn test_sub_second_precision() {
        let result = split(
            "2026-01-15T23:59:59.500+00:00",
            "2026-01-16T00:00:00.500+00:00",
        );

        assert!(result.is_overnight);
        assert_eq!(result.start_day_duration(), TimeDelta::milliseconds(500));
        assert_eq!(result.carry_duration(), TimeDelta::milliseconds(500));
    }

    #[test]
    fn test_reporting_offset_moves_calendar_date() {
        // 23:00 UTC is 09:00 the next morning in +10:00
        let policy = SplitPolicy {
            reporting_offset: FixedOffset::east_opt(10 * 3600),
            ..SplitPolicy::default()
        };
        let result = compute_shift_split(
            instant("2026-01-15T23:00:00+00:00"),
            Some(instant("2026-01-16T07:00:00+00:00")),
            &policy,
        )
        .unwrap()
        .unwrap();

        assert_eq!(result.start_date, make_date("2026-01-16"));
        assert_eq!(result.start_day_hours, dec("8"));
        assert!(!result.is_overnight);
    }

    #[test]
    fn test_clock_in_offset_used_without_reporting_offset() {
        // Same instants as above, but clock-in carries +10:00 itself
        let result = split("2026-01-16T09:00:00+10:00", "2026-01-16T07:00:00+00:00");

        assert_eq!(result.start_date, make_date("2026-01-16"));
        assert_eq!(result.effective_clock_out.to_rfc3339(), "2026-01-16T17:00:00+10:00");
        assert_eq!(result.full_shift_hours, dec("8"));
    }

    #[test]
    fn test_day_portions_for_overnight_shift() {
        let result = split("2026-01-15T22:00:00+00:00", "2026-01-16T06:00:00+00:00");

        assert_eq!(
            result.day_portions(),
            vec![
                (make_date("2026-01-15"), TimeDelta::hours(2)),
                (make_date("2026-01-16"), TimeDelta::hours(6)),
            ]
        );
    }

    #[test]
    fn test_split_entry_invalid_clock_in() {
        let entry = TimeEntry {
            id: "te_bad".to_string(),
            user_id: "user_1".to_string(),
            clock_in: "7:00 PM".to_string(),
            clock_out: Some("2026-01-16T07:00:00Z".to_string()),
        };

        let err = split_entry(&entry, &SplitPolicy::default()).unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");
    }

    #[test]
    fn test_split_entry_open_shift() {
        let entry = TimeEntry {
            id: "te_open".to_string(),
            user_id: "user_1".to_string(),
            clock_in: "2026-01-15T19:00:00Z".to_string(),
            clock_out: None,
        };

        assert!(split_entry(&entry, &SplitPolicy::default()).unwrap().is_none());
    }

    #[test]
    fn test_split_entry_naive_uses_reporting_offset() {
        let policy = SplitPolicy {
            reporting_offset: FixedOffset::east_opt(-5 * 3600),
            ..SplitPolicy::default()
        };
        let entry = TimeEntry {
            id: "te_naive".to_string(),
            user_id: "user_1".to_string(),
            clock_in: "2026-01-15T21:00:00".to_string(),
            clock_out: Some("2026-01-16T03:00:00".to_string()),
        };

        let result = split_entry(&entry, &policy).unwrap().unwrap();
        assert_eq!(result.clock_in.offset().local_minus_utc(), -5 * 3600);
        assert_eq!(result.start_day_hours, dec("3"));
        assert_eq!(result.carry_next_day_hours, dec("3"));
    }

    #[test]
    fn test_split_is_deterministic() {
        let first = split("2026-01-15T19:00:00+00:00", "2026-01-16T07:00:00+00:00");
        let second = split("2026-01-15T19:00:00+00:00", "2026-01-16T07:00:00+00:00");
        assert_eq!(first, second);
    }
}
