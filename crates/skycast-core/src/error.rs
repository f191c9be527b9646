//! Centralized error types for the Skycast application.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-friendly messages suitable for the dashboard notice line
//! - Preserves full error context for debugging/logging

use thiserror::Error;

/// Top-level application error type.
///
/// Crate-level errors (gateway, store, geolocation) are mapped into this
/// type at the dashboard boundary. Use `user_message()` for display.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    ///
    /// These messages are designed to be actionable and non-technical.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Storage(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
            AppError::Location(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }

    /// Whether the query that produced this error should fall back to the
    /// default city instead of being reported.
    pub fn triggers_fallback(&self) -> bool {
        matches!(self, AppError::Location(_))
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The weather service is experiencing issues. Please try again later."
            }
            NetworkError::ServerError { .. } => "Error fetching weather. Please try again.",
        }
    }
}

/// Preference storage errors (SQLite, local state).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Preference store unavailable: {0}")]
    Unavailable(String),

    #[error("Preference write failed: {0}")]
    WriteFailed(String),

    #[error("Preference data corrupted: {0}")]
    Corruption(String),
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::Unavailable(_) => {
                "Unable to access saved preferences. Using defaults."
            }
            StorageError::WriteFailed(_) => "Could not save your preference. Please try again.",
            StorageError::Corruption(_) => {
                "Saved preferences look damaged. Consider resetting them."
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Missing required setting: {0}")]
    MissingSetting(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::MissingSetting(_) => "A required setting is missing. Check your settings.",
        }
    }
}

/// Weather service errors.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("API key not configured")]
    MissingCredential,

    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Weather API error: {0}")]
    ApiError(String),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::MissingCredential => {
                "Add your OpenWeatherMap API key to config.toml (weather.api_key)."
            }
            WeatherError::LocationNotFound(_) => "City not found. Check the name and try again.",
            WeatherError::InvalidApiKey => "Weather API key is invalid. Check settings.",
            WeatherError::MalformedResponse(_) => {
                "Received an unexpected response from the weather service."
            }
            WeatherError::ApiError(_) => "Error fetching weather. Please try again.",
        }
    }

    /// Whether the error blocks every query until the user acts.
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            WeatherError::MissingCredential | WeatherError::InvalidApiKey
        )
    }
}

/// Device location errors. These degrade to a default-city lookup.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    Denied,

    #[error("Location request timed out")]
    Timeout,

    #[error("Location service unavailable")]
    Unavailable,
}

impl LocationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            LocationError::Denied => "Location permission denied or unavailable.",
            LocationError::Timeout => "Location lookup timed out. Showing the default city.",
            LocationError::Unavailable => "Geolocation not supported. Showing the default city.",
        }
    }
}
