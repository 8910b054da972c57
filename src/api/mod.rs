//! HTTP API module for the Timesheet Engine.
//!
//! This module provides the REST API endpoints for splitting shifts and
//! aggregating worked hours.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AggregateRequest, SplitRequest};
pub use response::{AggregateResponse, ApiError, ApiErrorResponse, SplitResponse, SplitView};
pub use state::AppState;
