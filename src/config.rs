//! Settings loaded from TOML.
//!
//! ```text
//! catalog = "data/puget_sound.json"
//! default_interval_minutes = 6
//!
//! [predictor]
//! parallel_threshold = 50000
//! ```
//!
//! Every key is optional.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::prediction::PredictorConfig;
use crate::time::{MAX_INTERVAL_MINUTES, MIN_INTERVAL_MINUTES, validate_interval};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value outside its allowed range
    #[error("invalid value '{key}': {value} - {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Application settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TideConfig {
    /// Catalog document used when none is given on the command line
    pub catalog: Option<PathBuf>,
    /// Sampling interval used when a request does not specify one
    pub default_interval_minutes: u32,
    /// Predictor tuning
    pub predictor: PredictorConfig,
}

impl Default for TideConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            default_interval_minutes: 6,
            predictor: PredictorConfig::default(),
        }
    }
}

impl TideConfig {
    /// Parse and validate settings from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if validate_interval(self.default_interval_minutes).is_err() {
            return Err(ConfigError::InvalidValue {
                key: "default_interval_minutes".to_string(),
                value: self.default_interval_minutes.to_string(),
                reason: format!(
                    "must be within {MIN_INTERVAL_MINUTES}..={MAX_INTERVAL_MINUTES} minutes"
                ),
            });
        }
        if self.predictor.parallel_threshold == 0 {
            return Err(ConfigError::InvalidValue {
                key: "predictor.parallel_threshold".to_string(),
                value: "0".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}
