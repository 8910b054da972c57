//! Error types for the Timesheet Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while splitting and aggregating
//! worked hours.

use thiserror::Error;

/// The main error type for the Timesheet Engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use timesheet_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds an unusable value.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A timestamp could not be parsed into a valid instant.
    #[error("Invalid {field} '{value}': {message}")]
    InvalidInput {
        /// The field that held the bad value (e.g. `clock_in`).
        field: String,
        /// The raw value as received.
        value: String,
        /// A description of the parse failure.
        message: String,
    },

    /// A shift whose clock-out cannot be reconciled with its clock-in,
    /// even after the next-day rollover.
    #[error("Malformed shift {clock_in} -> {clock_out}: {message}")]
    MalformedShift {
        /// The clock-in instant in RFC 3339 form.
        clock_in: String,
        /// The clock-out instant in RFC 3339 form.
        clock_out: String,
        /// A description of what made the shift malformed.
        message: String,
    },

    /// Adding a shift would take a user's accumulated hours past the
    /// largest representable duration.
    #[error("Accumulated hours for user '{user_id}' overflow: {message}")]
    HoursOverflow {
        /// The user whose total would overflow.
        user_id: String,
        /// A description of the rejected addition.
        message: String,
    },
}

impl EngineError {
    /// Returns a stable machine-readable code for the error.
    ///
    /// # Example
    ///
    /// ```
    /// use timesheet_engine::error::EngineError;
    ///
    /// let error = EngineError::InvalidInput {
    ///     field: "clock_in".to_string(),
    ///     value: "yesterday".to_string(),
    ///     message: "not a timestamp".to_string(),
    /// };
    /// assert_eq!(error.code(), "INVALID_INPUT");
    /// ```
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                "CONFIG_ERROR"
            }
            EngineError::InvalidConfig { .. } => "INVALID_CONFIG",
            EngineError::InvalidInput { .. } => "INVALID_INPUT",
            EngineError::MalformedShift { .. } => "MALFORMED_SHIFT",
            EngineError::HoursOverflow { .. } => "HOURS_OVERFLOW",
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
