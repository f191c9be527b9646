use skycast_core::{AppError, ConfigError};

/// Classify a failure from loading config or preparing the config directory.
pub fn map_startup_error(e: anyhow::Error) -> AppError {
    let e = match e.downcast::<ConfigError>() {
        Ok(config) => return AppError::Config(config),
        Err(e) => e,
    };
    match e.downcast::<std::io::Error>() {
        Ok(io) => AppError::Io(io),
        Err(e) => AppError::Other(e),
    }
}
