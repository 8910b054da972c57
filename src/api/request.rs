//! Request types for the Timesheet Engine API.
//!
//! This module defines the JSON request structures for the `/split` and
//! `/aggregate` endpoints.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::models::{PayPeriod, TimeEntry};

/// Request body for the `/split` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitRequest {
    /// The clock-in timestamp.
    pub clock_in: String,
    /// The clock-out timestamp; absent or null for an open shift.
    #[serde(default)]
    pub clock_out: Option<String>,
}

/// Request body for the `/aggregate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateRequest {
    /// The time entries to aggregate.
    pub entries: Vec<TimeEntry>,
    /// Overrides the configured first day of the week.
    #[serde(default)]
    pub week_start: Option<Weekday>,
    /// Restricts the totals to a pay period.
    #[serde(default)]
    pub pay_period: Option<PayPeriod>,
}

impl SplitRequest {
    /// Wraps the request as an anonymous [`TimeEntry`].
    pub fn into_entry(self) -> TimeEntry {
        TimeEntry {
            id: "request".to_string(),
            user_id: String::new(),
            clock_in: self.clock_in,
            clock_out: self.clock_out,
        }
    }
}
