pub mod app;
pub mod config;
pub mod error;

pub use app::App;
pub use config::{Config, DayBoundary, UiConfig, ValidationResult, WeatherConfig};
pub use error::{
    AppError, ConfigError, LocationError, NetworkError, StorageError, WeatherError,
};

use anyhow::Result;

/// Initialize logging. `RUST_LOG` overrides the default `info` filter.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Skycast core initialized");
    Ok(())
}
