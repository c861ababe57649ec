//! Top-level popsim configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{BalancerConfig, FactoringConfig, RoundingPolicy};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`POPSIM_*`)
/// 2. TOML file passed to [`PopsimConfig::load`]
/// 3. Compiled defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopsimConfig {
    pub balancer: BalancerConfig,
    pub factoring: FactoringConfig,
}

impl PopsimConfig {
    /// Parse a TOML document. Missing sections and fields keep their defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration with layered resolution, then validate it.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        Self::apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply environment variable overrides.
    /// Pattern: `POPSIM_MAX_ITERATIONS`, `POPSIM_MAX_GAP`, `POPSIM_ROUNDING`.
    fn apply_env_overrides(config: &mut PopsimConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("POPSIM_MAX_ITERATIONS") {
            config.balancer.max_iterations =
                val.parse::<usize>().map_err(|e| ConfigError::InvalidValue {
                    field: "POPSIM_MAX_ITERATIONS".to_string(),
                    message: e.to_string(),
                })?;
        }
        if let Ok(val) = std::env::var("POPSIM_MAX_GAP") {
            config.balancer.max_gap = val.parse::<f64>().map_err(|e| ConfigError::InvalidValue {
                field: "POPSIM_MAX_GAP".to_string(),
                message: e.to_string(),
            })?;
        }
        if let Ok(val) = std::env::var("POPSIM_ROUNDING") {
            config.factoring.rounding = val.parse::<RoundingPolicy>()?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.balancer.validate()
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
