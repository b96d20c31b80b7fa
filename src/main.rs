//! Connection Registry - Main entry point.
//!
//! Serves the connection-record registry over HTTP, backed by PostgreSQL
//! (or SQLite for local development).

use clap::Parser;
use connection_registry::config::Config;
use connection_registry::db::ConnectionRegistry;
use connection_registry::handlers::AppState;
use connection_registry::transport::HttpTransport;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber.with(fmt::layer().json()).init();
    } else {
        subscriber
            .with(fmt::layer().with_target(true).with_thread_ids(false))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is not an error
    let dotenv = dotenvy::dotenv();

    let config = Config::parse();
    init_tracing(&config);

    if let Err(e) = &dotenv {
        if !e.not_found() {
            warn!(error = %e, "Failed to load .env file");
        }
    }

    info!("Starting Connection Registry v{}", env!("CARGO_PKG_VERSION"));

    let db_config = config.parse_database()?;
    let table = config.parse_table()?;

    if config.empty_list_ok {
        info!("Empty connection listings answer 200 []");
    }

    let registry = ConnectionRegistry::connect(&db_config, &table).await?;
    let state = Arc::new(AppState::new(registry, config.empty_list_ok));

    let transport = HttpTransport::new(state, config.http_bind_addr());
    if let Err(e) = transport.run().await {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}
