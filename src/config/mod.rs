//! Configuration loading and management for the Timesheet Engine.
//!
//! This module provides functionality to load the engine configuration from
//! YAML, including the reporting offset used for calendar dates, the week
//! start for weekly totals, shift plausibility limits and server settings.
//!
//! # Example
//!
//! ```no_run
//! use timesheet_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded engine: {}", config.engine().name);
//! ```

mod loader;
mod types;

pub use loader::{CONFIG_FILE_NAME, ConfigLoader};
pub use types::{
    EngineConfig, EngineMetadata, MAX_DISPLAY_DECIMAL_PLACES, ReportingConfig, ServerConfig,
    ValidationConfig,
};
