//! # Cheapo Bot
//!
//! Discord economy bot entry point.
//!
//! This initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Datastore and repositories
//! - Discord client and the ops HTTP server

use anyhow::Result;
use tracing::info;

use cheapo_bot::config::Settings;
use cheapo_bot::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for structured logging
    cheapo_bot::telemetry::init_tracing();

    info!("Starting Cheapo Bot...");

    // Load configuration from environment and config files
    let settings = Settings::load()?;
    info!(
        prefix = %settings.discord.command_prefix,
        backend = %settings.database.backend,
        variants = settings.gambling.variants.len(),
        environment = %settings.environment,
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Connecting to the Discord gateway");
    application.run_until_stopped().await?;

    info!("Cheapo Bot stopped");
    Ok(())
}
