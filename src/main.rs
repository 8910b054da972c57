//! HTTP server for the Timesheet Engine.
//!
//! Loads configuration from `TIMESHEET_CONFIG_DIR` (default
//! `./config/default`) and serves the API on the configured address.
//! Log verbosity follows `RUST_LOG`.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use timesheet_engine::api::{AppState, create_router};
use timesheet_engine::config::ConfigLoader;

const CONFIG_DIR_ENV: &str = "TIMESHEET_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = "./config/default";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_dir = std::env::var(CONFIG_DIR_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)
        .with_context(|| format!("loading configuration from {}", config_dir))?;

    let bind_address = config.bind_address().to_string();
    let router = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("binding {}", bind_address))?;

    info!(address = %bind_address, "Timesheet engine listening");
    axum::serve(listener, router).await.context("serving HTTP")?;

    Ok(())
}
