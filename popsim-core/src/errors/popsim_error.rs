//! Workspace-level error aggregating subsystem errors.

use super::error_code::PopsimErrorCode;
use super::{BalanceError, ConfigError, FactoringError};

/// Top-level error. Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PopsimError {
    #[error("Balance error: {0}")]
    Balance(#[from] BalanceError),

    #[error("Factoring error: {0}")]
    Factoring(#[from] FactoringError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PopsimErrorCode for PopsimError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Balance(e) => e.error_code(),
            Self::Factoring(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

pub type PopsimResult<T> = Result<T, PopsimError>;
