//! Forecaster configuration

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default significance level for prediction intervals
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Settings shared by every forecaster instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecasterConfig {
    /// Significance level used when interval predictions are requested
    pub alpha: f64,
    /// Log a warning when predict replaces the stored horizon
    pub warn_on_horizon_change: bool,
}

impl Default for ForecasterConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            warn_on_horizon_change: true,
        }
    }
}

impl ForecasterConfig {
    /// Check that every setting is in range
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(ForecastError::ConfigError(format!(
                "alpha must be between 0 and 1, got {}",
                self.alpha
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
