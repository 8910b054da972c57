//! Response types for the Timesheet Engine API.
//!
//! This module defines the success payloads for `/split` and `/aggregate`,
//! the error response structures, and the mapping from engine errors.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::SplitPolicy;
use crate::error::EngineError;
use crate::models::{DailyHours, OpenShift, SkippedEntry, SplitResult, UserTotal, WeeklyHours};

/// A split result with hours rounded for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitView {
    /// The clock-in instant in the attribution offset.
    pub clock_in: DateTime<FixedOffset>,
    /// The clock-out after any next-day rollover.
    pub effective_clock_out: DateTime<FixedOffset>,
    /// Whether the recorded clock-out was moved to the next day.
    pub rolled_over: bool,
    /// The clock-in calendar date.
    pub start_date: NaiveDate,
    /// Hours on the clock-in date.
    pub start_day_hours: Decimal,
    /// Hours after midnight.
    pub carry_next_day_hours: Decimal,
    /// Total shift hours.
    pub full_shift_hours: Decimal,
    /// Whether any hours carry past midnight.
    pub is_overnight: bool,
    /// The date the carried hours belong to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_day_date: Option<NaiveDate>,
}

impl SplitView {
    /// Builds the display view of a split.
    pub fn new(split: &SplitResult, policy: &SplitPolicy) -> Self {
        Self {
            clock_in: split.clock_in,
            effective_clock_out: split.effective_clock_out,
            rolled_over: split.rolled_over,
            start_date: split.start_date,
            start_day_hours: policy.round_hours(split.start_day_hours),
            carry_next_day_hours: policy.round_hours(split.carry_next_day_hours),
            full_shift_hours: split.full_shift_hours,
            is_overnight: split.is_overnight,
            next_day_date: split.next_day_date,
        }
    }
}

/// Response body for the `/split` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitResponse {
    /// True when the shift has no clock-out yet.
    pub is_open: bool,
    /// The split, absent for an open shift.
    pub split: Option<SplitView>,
}

/// Response body for the `/aggregate` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateResponse {
    /// Hours per user per calendar date.
    pub daily: Vec<DailyHours>,
    /// Hours per user per week.
    pub weekly: Vec<WeeklyHours>,
    /// Hours per user.
    pub user_totals: Vec<UserTotal>,
    /// Entries still clocked in.
    pub open_shifts: Vec<OpenShift>,
    /// Entries that could not be aggregated.
    pub skipped: Vec<SkippedEntry>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let code = error.code();
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(code, "Configuration error", message),
            },
            EngineError::InvalidInput { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    code,
                    message,
                    "Timestamps must be RFC 3339 or YYYY-MM-DDTHH:MM:SS",
                ),
            },
            EngineError::MalformedShift { .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    code,
                    message,
                    "The clock-out cannot be reconciled with the clock-in",
                ),
            },
            EngineError::HoursOverflow { .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    code,
                    message,
                    "The accumulated hours are too large to represent",
                ),
            },
        }
    }
}
