//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type used to restrict aggregated
//! hours to a payroll window.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents a pay period as an inclusive calendar date range.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod {
///     start_date: NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 1, 25).unwrap(),
/// };
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 12).unwrap())); // start date
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 20).unwrap())); // middle
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 25).unwrap())); // end date
/// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 11).unwrap())); // before
/// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 26).unwrap())); // after
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Checks if a given date falls within this pay period.
    ///
    /// The check is inclusive of both start and end dates.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}
