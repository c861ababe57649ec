//! Meta control factoring errors.

use super::error_code::{self, PopsimErrorCode};

/// Errors that can occur while distributing meta controls to seed zones.
#[derive(Debug, thiserror::Error)]
pub enum FactoringError {
    #[error("{what} has length {got}, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("seed zone {seed_zone} appears in meta zones {first} and {second}")]
    SeedZoneMismatch {
        seed_zone: u32,
        first: u32,
        second: u32,
    },

    #[error("meta control table has no column for target '{target}'")]
    MissingTarget { target: String },

    #[error("meta zone {meta_zone} has households but no control row")]
    MissingMetaControl { meta_zone: u32 },

    #[error("meta zone {meta_zone} has zero factored weight for target '{target}' but control {control}")]
    ZeroMetaWeight {
        meta_zone: u32,
        target: String,
        control: f64,
    },

    #[error("seed zone {seed_zone} has no {what}")]
    UnknownSeedZone { seed_zone: u32, what: &'static str },

    #[error("control '{name}' missing from seed zone {seed_zone}")]
    MissingControl { seed_zone: u32, name: String },
}

impl PopsimErrorCode for FactoringError {
    fn error_code(&self) -> &'static str {
        error_code::FACTORING_ERROR
    }
}
