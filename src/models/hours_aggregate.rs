//! Aggregated hours models.
//!
//! This module contains the [`HoursAggregate`] produced by folding many time
//! entries, and the row types used to present its per-day, per-week and
//! per-user views.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{PayPeriod, duration_to_hours};

/// Bucket key for per-user, per-day totals.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DayKey {
    /// The employee.
    pub user_id: String,
    /// The calendar date the hours are attributed to.
    pub date: NaiveDate,
}

/// Hours attributed to one user on one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyHours {
    /// The employee.
    pub user_id: String,
    /// The calendar date.
    pub date: NaiveDate,
    /// The accumulated hours.
    pub hours: Decimal,
}

/// Hours attributed to one user within one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHours {
    /// The employee.
    pub user_id: String,
    /// The first calendar date of the week.
    pub week_start: NaiveDate,
    /// The accumulated hours.
    pub hours: Decimal,
}

/// Total hours for one user across every bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTotal {
    /// The employee.
    pub user_id: String,
    /// The accumulated hours.
    pub hours: Decimal,
}

/// A shift with no clock-out yet; the employee is currently clocked in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenShift {
    /// The entry identifier.
    pub entry_id: String,
    /// The employee.
    pub user_id: String,
    /// When the employee clocked in.
    pub clock_in: DateTime<FixedOffset>,
}

/// An entry left out of aggregation because it could not be split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    /// The entry identifier.
    pub entry_id: String,
    /// The employee.
    pub user_id: String,
    /// Machine-readable error code (e.g. `MALFORMED_SHIFT`).
    pub code: String,
    /// Human-readable reason.
    pub message: String,
}

/// The result of aggregating a batch of time entries.
///
/// Buckets hold exact durations; hours are derived when read, so totals do
/// not depend on the order entries were folded in.
///
/// Every duration is non-negative and each user's running total is kept
/// representable, so any sum over one user's buckets fits in a [`TimeDelta`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoursAggregate {
    buckets: BTreeMap<DayKey, TimeDelta>,
    totals: BTreeMap<String, TimeDelta>,
    /// Entries still clocked in, in input order.
    pub open_shifts: Vec<OpenShift>,
    /// Entries that were rejected, in input order.
    pub skipped: Vec<SkippedEntry>,
}

impl HoursAggregate {
    /// Creates an empty aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a duration to the `(user_id, date)` bucket.
    ///
    /// # Errors
    ///
    /// See [`HoursAggregate::add_portions`].
    pub fn add(&mut self, user_id: &str, date: NaiveDate, duration: TimeDelta) -> EngineResult<()> {
        self.add_portions(user_id, &[(date, duration)])
    }

    /// Adds every `(date, duration)` portion of one shift, or none of them.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] for a negative duration and
    /// [`EngineError::HoursOverflow`] when the user's total would no longer
    /// be representable. The aggregate is unchanged on error.
    pub fn add_portions(
        &mut self,
        user_id: &str,
        portions: &[(NaiveDate, TimeDelta)],
    ) -> EngineResult<()> {
        let mut user_total = self
            .totals
            .get(user_id)
            .copied()
            .unwrap_or_else(TimeDelta::zero);

        for (_, duration) in portions {
            if *duration < TimeDelta::zero() {
                return Err(EngineError::InvalidInput {
                    field: "duration".to_string(),
                    value: duration.to_string(),
                    message: "worked time cannot be negative".to_string(),
                });
            }
            user_total = user_total.checked_add(duration).ok_or_else(|| {
                EngineError::HoursOverflow {
                    user_id: user_id.to_string(),
                    message: format!("cannot add {} to {}", duration, user_total),
                }
            })?;
        }

        // Each bucket stays below the user's total, so these additions fit.
        for (date, duration) in portions {
            let key = DayKey {
                user_id: user_id.to_string(),
                date: *date,
            };
            let bucket = self.buckets.entry(key).or_insert_with(TimeDelta::zero);
            *bucket = *bucket + *duration;
        }
        self.totals.insert(user_id.to_string(), user_total);

        Ok(())
    }

    /// Iterates over the non-empty buckets in `(user_id, date)` order.
    pub fn buckets(&self) -> impl Iterator<Item = (&DayKey, &TimeDelta)> {
        self.buckets.iter()
    }

    /// Returns true when no hours were attributed to any bucket.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Returns the exact duration attributed to a user on a date.
    pub fn duration_for(&self, user_id: &str, date: NaiveDate) -> TimeDelta {
        let key = DayKey {
            user_id: user_id.to_string(),
            date,
        };
        self.buckets.get(&key).copied().unwrap_or_else(TimeDelta::zero)
    }

    /// Returns the hours attributed to a user on a date (zero if none).
    pub fn hours_for(&self, user_id: &str, date: NaiveDate) -> Decimal {
        duration_to_hours(self.duration_for(user_id, date))
    }

    /// Returns every bucket as a [`DailyHours`] row, sorted by user then date.
    pub fn daily_hours(&self) -> Vec<DailyHours> {
        self.buckets
            .iter()
            .map(|(key, duration)| DailyHours {
                user_id: key.user_id.clone(),
                date: key.date,
                hours: duration_to_hours(*duration),
            })
            .collect()
    }

    /// Returns the total hours per user, sorted by user.
    pub fn user_totals(&self) -> Vec<UserTotal> {
        self.totals
            .iter()
            .map(|(user_id, duration)| UserTotal {
                user_id: user_id.clone(),
                hours: duration_to_hours(*duration),
            })
            .collect()
    }

    /// Returns a copy keeping only buckets whose date falls in `period`.
    ///
    /// Open and skipped entries are carried over unchanged.
    pub fn restricted_to(&self, period: &PayPeriod) -> HoursAggregate {
        let buckets: BTreeMap<DayKey, TimeDelta> = self
            .buckets
            .iter()
            .filter(|(key, _)| period.contains_date(key.date))
            .map(|(key, duration)| (key.clone(), *duration))
            .collect();

        // A subset of a user's buckets never exceeds the user's full total.
        let mut totals: BTreeMap<String, TimeDelta> = BTreeMap::new();
        for (key, duration) in &buckets {
            let total = totals
                .entry(key.user_id.clone())
                .or_insert_with(TimeDelta::zero);
            *total = total.checked_add(duration).unwrap_or(TimeDelta::MAX);
        }

        HoursAggregate {
            buckets,
            totals,
            open_shifts: self.open_shifts.clone(),
            skipped: self.skipped.clone(),
        }
    }
}
