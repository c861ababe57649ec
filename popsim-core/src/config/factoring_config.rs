use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// How seed-level meta controls are rounded after factoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Round to a whole number, ties to even.
    #[default]
    Nearest,
    /// Keep the fractional factored value.
    None,
}

impl RoundingPolicy {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Nearest => value.round_ties_even(),
            Self::None => value,
        }
    }
}

impl FromStr for RoundingPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "none" => Ok(Self::None),
            other => Err(ConfigError::InvalidValue {
                field: "factoring.rounding".to_string(),
                message: format!("unknown rounding policy '{other}'"),
            }),
        }
    }
}

impl fmt::Display for RoundingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nearest => f.write_str("nearest"),
            Self::None => f.write_str("none"),
        }
    }
}

/// Meta control factoring configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoringConfig {
    /// Rounding applied to seed-level meta controls.
    pub rounding: RoundingPolicy,
}
