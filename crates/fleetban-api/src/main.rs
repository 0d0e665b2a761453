//! Admin API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p fleetban-api
//! ```
//!
//! Configuration is loaded from a `.env` file and environment variables.

use fleetban_common::{try_init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let tracing_config = match std::env::var("APP_ENV").as_deref() {
        Ok("production" | "Production") => TracingConfig::production(),
        _ => TracingConfig::development(),
    };
    if let Err(e) = try_init_tracing(&tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting fleetban admin API...");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        port = config.api.port,
        bot_export = config.relay.bot_export_url.is_some(),
        "Configuration loaded"
    );

    fleetban_api::run(config).await?;

    Ok(())
}
