//! Configuration for popsim.
//! TOML-based, 3-layer resolution: env > file > defaults.

pub mod balancer_config;
pub mod defaults;
pub mod factoring_config;
pub mod popsim_config;

pub use balancer_config::BalancerConfig;
pub use factoring_config::{FactoringConfig, RoundingPolicy};
pub use popsim_config::PopsimConfig;
