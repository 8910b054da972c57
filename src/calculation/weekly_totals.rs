//! Weekly rollups of aggregated hours.

use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeDelta, Weekday};

use crate::models::{HoursAggregate, WeeklyHours, duration_to_hours};

use super::day_boundary::week_start_date;

/// Rolls daily buckets up into weeks starting on `week_start`.
///
/// Rows are sorted by user, then by week start date.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::weekly_totals;
/// use timesheet_engine::models::HoursAggregate;
/// use chrono::{NaiveDate, TimeDelta, Weekday};
/// use rust_decimal::Decimal;
///
/// let mut aggregate = HoursAggregate::new();
/// // Sunday 2026-01-18 and Monday 2026-01-19 fall in different Monday weeks
/// aggregate.add("user_1", NaiveDate::from_ymd_opt(2026, 1, 18).unwrap(), TimeDelta::hours(5))?;
/// aggregate.add("user_1", NaiveDate::from_ymd_opt(2026, 1, 19).unwrap(), TimeDelta::hours(7))?;
///
/// let weeks = weekly_totals(&aggregate, Weekday::Mon);
/// assert_eq!(weeks.len(), 2);
/// assert_eq!(weeks[0].hours, Decimal::from(5));
/// # Ok::<(), timesheet_engine::error::EngineError>(())
/// ```
pub fn weekly_totals(aggregate: &HoursAggregate, week_start: Weekday) -> Vec<WeeklyHours> {
    let mut weeks: BTreeMap<(&str, NaiveDate), TimeDelta> = BTreeMap::new();

    for (key, duration) in aggregate.buckets() {
        let week = week_start_date(key.date, week_start);
        let total = weeks
            .entry((key.user_id.as_str(), week))
            .or_insert_with(TimeDelta::zero);
        // Bounded by the user's total, which the aggregate keeps representable.
        *total = total.checked_add(duration).unwrap_or(TimeDelta::MAX);
    }

    weeks
        .into_iter()
        .map(|((user_id, week), duration)| WeeklyHours {
            user_id: user_id.to_string(),
            week_start: week,
            hours: duration_to_hours(duration),
        })
        .collect()
}
