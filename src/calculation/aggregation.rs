//! Per-user, per-day hour aggregation.
//!
//! Folds a batch of time entries into [`HoursAggregate`] buckets using the
//! overnight split for each completed entry. A bad entry is skipped and
//! reported; it never aborts the batch.

use tracing::{debug, warn};

use crate::error::EngineResult;
use crate::models::{HoursAggregate, OpenShift, SkippedEntry, TimeEntry};

use super::overnight_split::{SplitPolicy, split_entry};

/// Aggregates worked hours by `(user_id, calendar date)`.
///
/// For each completed entry the clock-in date receives the entry's
/// start-day hours and, for overnight shifts, the next date receives the
/// carried hours. Entries still clocked in contribute nothing and are listed
/// in [`HoursAggregate::open_shifts`]. Entries that fail to parse or split
/// are listed in [`HoursAggregate::skipped`].
///
/// The totals do not depend on input order. Entries are not deduplicated:
/// an entry supplied twice is counted twice.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::{aggregate_hours, SplitPolicy};
/// use timesheet_engine::models::TimeEntry;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let entries = vec![TimeEntry {
///     id: "te_001".to_string(),
///     user_id: "user_1".to_string(),
///     clock_in: "2026-01-15T19:00:00Z".to_string(),
///     clock_out: Some("2026-01-16T07:00:00Z".to_string()),
/// }];
///
/// let aggregate = aggregate_hours(&entries, &SplitPolicy::default());
/// let day = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let next_day = NaiveDate::from_ymd_opt(2026, 1, 16).unwrap();
/// assert_eq!(aggregate.hours_for("user_1", day), Decimal::from(5));
/// assert_eq!(aggregate.hours_for("user_1", next_day), Decimal::from(7));
/// ```
pub fn aggregate_hours(entries: &[TimeEntry], policy: &SplitPolicy) -> HoursAggregate {
    let mut aggregate = HoursAggregate::new();

    for entry in entries {
        if let Err(err) = fold_entry(&mut aggregate, entry, policy) {
            warn!(
                entry_id = %entry.id,
                user_id = %entry.user_id,
                error = %err,
                "Skipping time entry"
            );
            aggregate.skipped.push(SkippedEntry {
                entry_id: entry.id.clone(),
                user_id: entry.user_id.clone(),
                code: err.code().to_string(),
                message: err.to_string(),
            });
        }
    }

    debug!(
        entries = entries.len(),
        open = aggregate.open_shifts.len(),
        skipped = aggregate.skipped.len(),
        "Aggregated time entries"
    );

    aggregate
}

fn fold_entry(
    aggregate: &mut HoursAggregate,
    entry: &TimeEntry,
    policy: &SplitPolicy,
) -> EngineResult<()> {
    if entry.is_open() {
        let clock_in = entry.clock_in_instant(policy.default_offset())?;
        aggregate.open_shifts.push(OpenShift {
            entry_id: entry.id.clone(),
            user_id: entry.user_id.clone(),
            clock_in: policy
                .reporting_offset
                .map_or(clock_in, |offset| clock_in.with_timezone(&offset)),
        });
        return Ok(());
    }

    match split_entry(entry, policy)? {
        Some(split) => aggregate.add_portions(&entry.user_id, &split.day_portions()),
        None => Ok(()),
    }
}
