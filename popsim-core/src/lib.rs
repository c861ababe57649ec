//! # popsim-core
//!
//! Foundation crate for the popsim workspace.
//! Defines the balancing problem and outcome models, the balancer trait,
//! errors, configuration, and tracing setup. Every other crate depends on this.

pub mod config;
pub mod errors;
pub mod models;
pub mod tracing;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{BalancerConfig, FactoringConfig, PopsimConfig, RoundingPolicy};
pub use errors::{BalanceError, ConfigError, FactoringError, PopsimError, PopsimErrorCode};
pub use models::{
    BalanceOptions, BalanceOutcome, BalanceProblem, BalanceStatus, ControlSummary, WeightBound,
    WeightRecord,
};
pub use traits::IBalancer;
