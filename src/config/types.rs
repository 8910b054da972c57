//! Configuration types for the timesheet engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file.

use chrono::{FixedOffset, Offset, Utc, Weekday};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::{DEFAULT_DISPLAY_DECIMAL_PLACES, SplitPolicy};
use crate::error::{EngineError, EngineResult};

/// Largest display precision accepted from configuration.
pub const MAX_DISPLAY_DECIMAL_PLACES: u32 = 10;

/// Metadata about the engine deployment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineMetadata {
    /// Human-readable name reported by the health endpoint.
    pub name: String,
    /// Version label of this configuration.
    pub version: String,
}

impl Default for EngineMetadata {
    fn default() -> Self {
        Self {
            name: "Timesheet hours engine".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// How hours are attributed to dates and presented.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportingConfig {
    /// UTC offset for calendar dates and naive timestamps (e.g. "+10:00").
    pub utc_offset: Option<String>,
    /// First day of the week for weekly totals.
    pub week_start: Weekday,
    /// Decimal places for displayed hours.
    pub display_decimal_places: u32,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            utc_offset: None,
            week_start: Weekday::Mon,
            display_decimal_places: DEFAULT_DISPLAY_DECIMAL_PLACES,
        }
    }
}

/// Plausibility limits for incoming shifts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Longest accepted shift in hours; unlimited when absent.
    pub max_shift_hours: Option<Decimal>,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// The complete engine configuration as loaded from `engine.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Deployment metadata.
    #[serde(default)]
    pub engine: EngineMetadata,
    /// Reporting settings.
    #[serde(default)]
    pub reporting: ReportingConfig,
    /// Validation settings.
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

impl EngineConfig {
    /// Builds the [`SplitPolicy`] described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if the offset cannot be parsed,
    /// the precision is out of range, or the maximum shift length is not
    /// positive.
    ///
    /// # Example
    ///
    /// ```
    /// use timesheet_engine::config::EngineConfig;
    ///
    /// let mut config = EngineConfig::default();
    /// config.reporting.utc_offset = Some("+10:00".to_string());
    ///
    /// let policy = config.split_policy().unwrap();
    /// assert_eq!(policy.reporting_offset.unwrap().local_minus_utc(), 36_000);
    /// ```
    pub fn split_policy(&self) -> EngineResult<SplitPolicy> {
        let reporting_offset = self
            .reporting
            .utc_offset
            .as_deref()
            .map(parse_offset)
            .transpose()?;

        if self.reporting.display_decimal_places > MAX_DISPLAY_DECIMAL_PLACES {
            return Err(EngineError::InvalidConfig {
                field: "reporting.display_decimal_places".to_string(),
                message: format!(
                    "{} exceeds the maximum of {}",
                    self.reporting.display_decimal_places, MAX_DISPLAY_DECIMAL_PLACES
                ),
            });
        }

        if let Some(max_hours) = self.validation.max_shift_hours {
            if max_hours <= Decimal::ZERO {
                return Err(EngineError::InvalidConfig {
                    field: "validation.max_shift_hours".to_string(),
                    message: format!("must be positive, got {}", max_hours),
                });
            }
        }

        Ok(SplitPolicy {
            reporting_offset,
            max_shift_hours: self.validation.max_shift_hours,
            display_decimal_places: self.reporting.display_decimal_places,
        })
    }
}

/// Parses "Z", "UTC" or a signed "+HH:MM" offset.
fn parse_offset(value: &str) -> EngineResult<FixedOffset> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return Ok(Utc.fix());
    }

    trimmed
        .parse::<FixedOffset>()
        .map_err(|e| EngineError::InvalidConfig {
            field: "reporting.utc_offset".to_string(),
            message: format!("'{}' is not a UTC offset: {}", value, e),
        })
}
