use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Prefix for environment overrides, e.g. `SKYCAST__WEATHER__API_KEY`.
const ENV_PREFIX: &str = "SKYCAST";
const ENV_SEPARATOR: &str = "__";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory (holds config.toml and the preference database)
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,

    /// Weather settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Terminal rendering preferences
    #[serde(default)]
    pub ui: UiConfig,
}

/// Which calendar day a forecast sample belongs to.
///
/// `Location` shifts each timestamp by the forecast location's UTC offset
/// before taking the date; `Utc` uses the raw timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DayBoundary {
    #[default]
    Location,
    Utc,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key
    pub api_key: String,

    /// Base URL of the OpenWeatherMap 2.5 API
    pub base_url: String,

    /// City queried when geolocation is denied or times out
    pub default_city: String,

    /// Number of forecast samples shown in the hourly trend
    pub hourly_window: usize,

    /// Day bucketing policy for the multi-day summary
    pub day_boundary: DayBoundary,

    /// How long to wait for a device position before falling back
    pub geolocation_timeout_secs: u64,

    /// Configured device latitude, used by the `here` command
    pub latitude: Option<f64>,

    /// Configured device longitude, used by the `here` command
    pub longitude: Option<f64>,
}

impl WeatherConfig {
    /// Configured coordinates, if both halves are present
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: "YOUR_OPENWEATHERMAP_API_KEY".to_string(),
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            default_city: "London".to_string(),
            hourly_window: 8,
            day_boundary: DayBoundary::Location,
            geolocation_timeout_secs: 10,
            latitude: None,
            longitude: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Terminal width used for the dashboard layout
    pub width: u16,

    /// Emit ANSI colors
    pub color: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            width: 72,
            color: true,
        }
    }
}

fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("skycast")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            weather: WeatherConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, layering `SKYCAST__*` environment
    /// variables on top. A default file is written when none exists.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let mut config = Self::default();
            if let Some(parent) = path.parent() {
                config.config_dir = parent.to_path_buf();
            }
            config.save_to(path)?;
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Toml))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated(path: Option<&Path>) -> Result<(Self, ValidationResult)> {
        let config = match path {
            Some(p) => Self::load_from(p)?,
            None => Self::load()?,
        };
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.weather.base_url, "weather.base_url", &mut result);

        if self.weather.default_city.trim().is_empty() {
            result.add_error("weather.default_city", "Default city must not be empty");
        }

        if self.weather.hourly_window == 0 {
            result.add_error(
                "weather.hourly_window",
                "Hourly window must be greater than 0",
            );
        } else if self.weather.hourly_window > 40 {
            result.add_warning(
                "weather.hourly_window",
                "Hourly window exceeds the 40-sample forecast horizon",
            );
        }

        if self.weather.geolocation_timeout_secs == 0 {
            result.add_error(
                "weather.geolocation_timeout_secs",
                "Geolocation timeout must be greater than 0",
            );
        } else if self.weather.geolocation_timeout_secs > 60 {
            result.add_warning(
                "weather.geolocation_timeout_secs",
                "Geolocation timeout is more than a minute",
            );
        }

        match (self.weather.latitude, self.weather.longitude) {
            (Some(lat), Some(lon)) => {
                if !(-90.0..=90.0).contains(&lat) {
                    result.add_error("weather.latitude", "Latitude must be within -90..=90");
                }
                if !(-180.0..=180.0).contains(&lon) {
                    result.add_error("weather.longitude", "Longitude must be within -180..=180");
                }
            }
            (None, None) => {}
            _ => result.add_warning(
                "weather.latitude",
                "Only one of latitude/longitude is set - position will be ignored",
            ),
        }

        if self.ui.width < 40 {
            result.add_error("ui.width", "Width must be at least 40 columns");
        } else if self.ui.width > 400 {
            result.add_warning("ui.width", "Width is unusually large (>400)");
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if let Some(port) = url.port() {
                    if port == 0 {
                        result.add_error(field_name, "Port cannot be 0");
                    }
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Path of the preference database inside the config directory
    pub fn preferences_path(&self) -> PathBuf {
        self.config_dir.join("preferences.db")
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| {
                ConfigError::MissingSetting("--config (no platform config directory)".into())
            })?
            .join("skycast");

        Ok(config_dir.join("config.toml"))
    }
}
