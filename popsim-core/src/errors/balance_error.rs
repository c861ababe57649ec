//! Balancer input contract violations.

use super::error_code::{self, PopsimErrorCode};
use super::ConfigError;

/// Errors raised at balancer entry when the inputs break the call contract.
///
/// Non-convergence is not an error; it is reported through
/// [`BalanceStatus::converged`](crate::models::BalanceStatus).
#[derive(Debug, thiserror::Error)]
pub enum BalanceError {
    #[error("{what} has length {got}, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("master control index {index} out of range for {control_count} controls")]
    MasterControlOutOfRange { index: usize, control_count: usize },

    #[error("incidence[{sample}, {control}] = {value} is not a finite non-negative number")]
    InvalidIncidence {
        sample: usize,
        control: usize,
        value: f64,
    },

    #[error("initial weight {value} for sample {sample} is not a finite non-negative number")]
    InvalidWeight { sample: usize, value: f64 },

    #[error("bounds for sample {sample} are inverted: lower {lower} > upper {upper}")]
    InvalidBounds {
        sample: usize,
        lower: f64,
        upper: f64,
    },

    #[error("balancing problem has no samples or no controls")]
    EmptyProblem,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PopsimErrorCode for BalanceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            _ => error_code::BALANCE_ERROR,
        }
    }
}
