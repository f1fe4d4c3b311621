//! Configuration for the digital twin model.
//!
//! Holds the model version stamped on new states and the scoring weights
//! used by the derived-metric calculator.


use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{TwinError, TwinResult};
use crate::scoring::{DerivedMetricCalculator, ScoringWeights};
use crate::state::{is_semver, STATE_MODEL_VERSION};

/// Prefix for environment overrides, e.g. `DIGITAL_TWIN__SCORING__BALANCE_DECAY`.
pub const ENV_PREFIX: &str = "DIGITAL_TWIN";

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwinConfig {
    /// Semantic version stamped on new states
    pub model_version: String,
    pub scoring: ScoringWeights,
}

impl Default for TwinConfig {
    fn default() -> Self {
        Self {
            model_version: STATE_MODEL_VERSION.to_string(),
            scoring: ScoringWeights::default(),
        }
    }
}

impl TwinConfig {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in order:
    /// 1. config/default.toml (base settings)
    /// 2. config/{DIGITAL_TWIN_ENV}.toml (environment-specific)
    /// 3. Environment variables with DIGITAL_TWIN prefix
    pub fn load() -> TwinResult<Self> {
        let env = std::env::var("DIGITAL_TWIN_ENV").unwrap_or_else(|_| "development".to_string());

        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        let config: TwinConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        tracing::debug!(
            model_version = %config.model_version,
            env = %env,
            "Loaded digital twin configuration"
        );
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> TwinResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TwinError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> TwinResult<Self> {
        let config: TwinConfig = toml::from_str(content)
            .map_err(|e| TwinError::ConfigError(format!("Failed to parse config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> TwinResult<()> {
        if !is_semver(&self.model_version) {
            return Err(TwinError::ConfigError(format!(
                "model_version must be a semantic version (MAJOR.MINOR.PATCH), got '{}'",
                self.model_version
            )));
        }
        self.scoring.validate()
    }

    /// Build a calculator from the configured weights.
    pub fn calculator(&self) -> TwinResult<DerivedMetricCalculator> {
        DerivedMetricCalculator::with_weights(self.scoring)
    }
}
