//! Split result model.
//!
//! This module contains the [`SplitResult`] type describing how one shift's
//! hours fall either side of the midnight boundary.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta};
use rust_decimal::Decimal;
use serde::Serialize;

/// Milliseconds in one hour.
pub const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Converts a duration to fractional hours (milliseconds / 3,600,000).
///
/// # Example
///
/// ```
/// use timesheet_engine::models::duration_to_hours;
/// use chrono::TimeDelta;
/// use rust_decimal::Decimal;
///
/// assert_eq!(duration_to_hours(TimeDelta::minutes(90)), Decimal::new(15, 1));
/// ```
pub fn duration_to_hours(duration: TimeDelta) -> Decimal {
    Decimal::from(duration.num_milliseconds()) / Decimal::from(MILLIS_PER_HOUR)
}

/// The per-day attribution of a completed shift.
///
/// Computed fresh from a clock-in / clock-out pair and never stored.
/// `start_day_hours` and `carry_next_day_hours` are unrounded; only
/// `full_shift_hours` is rounded to the display precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitResult {
    /// The clock-in instant in the offset used for day attribution.
    pub clock_in: DateTime<FixedOffset>,
    /// The clock-out instant after any next-day rollover.
    pub effective_clock_out: DateTime<FixedOffset>,
    /// Whether 24 hours were added to the recorded clock-out.
    pub rolled_over: bool,
    /// The calendar date of the clock-in.
    pub start_date: NaiveDate,
    /// Hours worked on the clock-in date, up to midnight.
    pub start_day_hours: Decimal,
    /// Hours worked after midnight.
    pub carry_next_day_hours: Decimal,
    /// Total shift hours rounded for display.
    pub full_shift_hours: Decimal,
    /// True when some hours carry past midnight.
    pub is_overnight: bool,
    /// The date the carried hours belong to, present only for overnight shifts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_day_date: Option<NaiveDate>,
    #[serde(skip)]
    pub(crate) start_day_duration: TimeDelta,
    #[serde(skip)]
    pub(crate) carry_duration: TimeDelta,
}

impl SplitResult {
    /// Returns the unrounded total of both day portions.
    pub fn total_hours(&self) -> Decimal {
        self.start_day_hours + self.carry_next_day_hours
    }

    /// Returns the wall-clock hours between clock-in and the effective clock-out.
    pub fn elapsed_hours(&self) -> Decimal {
        duration_to_hours(self.effective_clock_out - self.clock_in)
    }

    /// Returns the exact duration attributed to the clock-in date.
    pub fn start_day_duration(&self) -> TimeDelta {
        self.start_day_duration
    }

    /// Returns the exact duration carried into the next day.
    pub fn carry_duration(&self) -> TimeDelta {
        self.carry_duration
    }

    /// Returns the non-empty `(date, duration)` portions of the shift in
    /// chronological order.
    pub fn day_portions(&self) -> Vec<(NaiveDate, TimeDelta)> {
        let mut portions = Vec::with_capacity(2);
        if self.start_day_duration > TimeDelta::zero() {
            portions.push((self.start_date, self.start_day_duration));
        }
        if let Some(next_day) = self.next_day_date {
            portions.push((next_day, self.carry_duration));
        }
        portions
    }
}
