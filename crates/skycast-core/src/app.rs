use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use crate::config::{Config, ValidationResult};
use crate::error::ConfigError;

/// Application lifecycle: owns the validated configuration shared by the
/// weather pipeline, the preference store and the presenter.
pub struct App {
    config: Arc<Config>,
    validation: ValidationResult,
}

impl App {
    /// Load and validate configuration, from `config_path` or the default location
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let (config, validation) = Config::load_validated(config_path)?;
        Ok(Self::from_parts(config, validation))
    }

    /// Build an application around an already-loaded configuration
    pub fn from_config(config: Config) -> Result<Self> {
        let validation = config.validate();
        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }
        Ok(Self::from_parts(config, validation))
    }

    fn from_parts(config: Config, validation: ValidationResult) -> Self {
        Self {
            config: Arc::new(config),
            validation,
        }
    }

    /// Prepare on-disk state (config directory for the preference database)
    pub fn initialize(&mut self) -> Result<()> {
        std::fs::create_dir_all(&self.config.config_dir).with_context(|| {
            format!(
                "Failed to create config directory {}",
                self.config.config_dir.display()
            )
        })?;

        tracing::info!(
            config_dir = %self.config.config_dir.display(),
            warnings = self.validation.warnings.len(),
            "Application initialized successfully"
        );
        Ok(())
    }

    /// Shutdown the application
    pub fn shutdown(&mut self) -> Result<()> {
        tracing::info!("Shutting down application");
        Ok(())
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared handle to the configuration
    pub fn shared_config(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }

    /// Validation warnings collected at load time
    pub fn warnings(&self) -> &[crate::config::ConfigValidationError] {
        &self.validation.warnings
    }
}
