//! Initia to Aptos REST Translation Gateway
//!
//! Entry point for the bridge gateway. Loads configuration from the
//! environment/.env file and serves the Aptos-compatible API on the
//! configured port.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use initia_aptos_bridge::config::Config;
use initia_aptos_bridge::server::start_server;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .init();

    info!("=== Initia to Aptos Bridge API ===");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Serving an Aptos-compatible REST API backed by Initia");
    info!("");

    // Load configuration
    let config = Config::from_env()?;

    info!("Configuration:");
    info!("  Port: {}", config.port);
    info!("  Chain ID: {}", config.chain_id);
    info!("  Upstream: {} ({})", config.endpoint, config.source_chain_id);
    info!(
        "  Cache: {}",
        if config.cache_enabled {
            format!("enabled ({})", config.cache_duration)
        } else {
            "disabled".to_string()
        }
    );
    info!("");

    // Start the gateway
    start_server(config).await?;

    Ok(())
}
