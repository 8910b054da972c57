//! Core data models for the Timesheet Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod hours_aggregate;
mod pay_period;
mod split_result;
mod time_entry;

pub use hours_aggregate::{
    DailyHours, DayKey, HoursAggregate, OpenShift, SkippedEntry, UserTotal, WeeklyHours,
};
pub use pay_period::PayPeriod;
pub use split_result::{MILLIS_PER_HOUR, SplitResult, duration_to_hours};
pub use time_entry::{TimeEntry, parse_instant};
