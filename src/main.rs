//! MeteoMap server binary: load configuration, initialize logging, serve the
//! dashboard.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use meteomap::config::{LoggingConfig, MeteoMapConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let config = MeteoMapConfig::load()?;
    init_tracing(&config.logging)?;

    tracing::info!(version = meteomap::VERSION, "Starting MeteoMap dashboard");

    meteomap::web::run(config).await
}

/// Install the global tracing subscriber from logging configuration.
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .with_context(|| "Invalid log filter")?;

    match config.format.as_str() {
        "json" => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    Ok(())
}
