//! Calculation logic for the Timesheet Engine.
//!
//! This module contains the overnight split that attributes a shift's hours
//! to calendar days, the aggregation of many entries into per-user daily
//! buckets, and the weekly rollups built on those buckets.

mod aggregation;
mod day_boundary;
mod overnight_split;
mod weekly_totals;

pub use aggregation::aggregate_hours;
pub use day_boundary::{next_midnight, week_start_date};
pub use overnight_split::{
    DEFAULT_DISPLAY_DECIMAL_PLACES, SplitPolicy, compute_shift_split, split_entry,
};
pub use weekly_totals::weekly_totals;
