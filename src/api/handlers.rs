//! HTTP request handlers for the Timesheet Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{SplitPolicy, aggregate_hours, split_entry, weekly_totals};
use crate::models::{DailyHours, UserTotal, WeeklyHours};

use super::request::{AggregateRequest, SplitRequest};
use super::response::{AggregateResponse, ApiError, ApiErrorResponse, SplitResponse, SplitView};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/split", post(split_handler))
        .route("/aggregate", post(aggregate_handler))
        .with_state(state)
}

/// Handler for GET /health endpoint.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let engine = state.config().engine();
    Json(json!({
        "status": "ok",
        "engine": engine.name,
        "version": engine.version,
    }))
}

/// Handler for POST /split endpoint.
///
/// Splits a single clock-in / clock-out pair at midnight.
async fn split_handler(
    State(state): State<AppState>,
    payload: Result<Json<SplitRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing split request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let policy = state.config().policy();
    let entry = request.into_entry();

    match split_entry(&entry, policy) {
        Ok(split) => {
            info!(
                correlation_id = %correlation_id,
                is_open = split.is_none(),
                full_shift_hours = ?split.as_ref().map(|s| s.full_shift_hours),
                "Split completed successfully"
            );
            let body = SplitResponse {
                is_open: split.is_none(),
                split: split.as_ref().map(|s| SplitView::new(s, policy)),
            };
            json_response(StatusCode::OK, body)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Split failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /aggregate endpoint.
///
/// Aggregates a batch of entries into daily, weekly and per-user totals.
/// Entries that fail are reported in the body; they do not fail the request.
async fn aggregate_handler(
    State(state): State<AppState>,
    payload: Result<Json<AggregateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing aggregate request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if let Some(period) = &request.pay_period {
        if period.end_date < period.start_date {
            warn!(correlation_id = %correlation_id, "Pay period ends before it starts");
            return json_response(
                StatusCode::BAD_REQUEST,
                ApiError::validation_error(format!(
                    "pay_period end_date {} is before start_date {}",
                    period.end_date, period.start_date
                )),
            );
        }
    }

    let config = state.config();
    let policy = config.policy();
    let week_start = request.week_start.unwrap_or_else(|| config.week_start());

    let start_time = Instant::now();
    let mut aggregate = aggregate_hours(&request.entries, policy);
    if let Some(period) = &request.pay_period {
        aggregate = aggregate.restricted_to(period);
    }

    let body = AggregateResponse {
        daily: rounded_daily(aggregate.daily_hours(), policy),
        weekly: rounded_weekly(weekly_totals(&aggregate, week_start), policy),
        user_totals: rounded_totals(aggregate.user_totals(), policy),
        open_shifts: aggregate.open_shifts,
        skipped: aggregate.skipped,
    };

    info!(
        correlation_id = %correlation_id,
        entries = request.entries.len(),
        buckets = body.daily.len(),
        skipped = body.skipped.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Aggregation completed successfully"
    );

    json_response(StatusCode::OK, body)
}

fn rounded_daily(rows: Vec<DailyHours>, policy: &SplitPolicy) -> Vec<DailyHours> {
    rows.into_iter()
        .map(|row| DailyHours {
            hours: policy.round_hours(row.hours),
            ..row
        })
        .collect()
}

fn rounded_weekly(rows: Vec<WeeklyHours>, policy: &SplitPolicy) -> Vec<WeeklyHours> {
    rows.into_iter()
        .map(|row| WeeklyHours {
            hours: policy.round_hours(row.hours),
            ..row
        })
        .collect()
}

fn rounded_totals(rows: Vec<UserTotal>, policy: &SplitPolicy) -> Vec<UserTotal> {
    rows.into_iter()
        .map(|row| UserTotal {
            hours: policy.round_hours(row.hours),
            ..row
        })
        .collect()
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a JSON body rejection to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}
