//! Error handling for popsim.
//! One error enum per subsystem, `thiserror` only.

pub mod balance_error;
pub mod config_error;
pub mod error_code;
pub mod factoring_error;
pub mod popsim_error;

pub use balance_error::BalanceError;
pub use config_error::ConfigError;
pub use error_code::PopsimErrorCode;
pub use factoring_error::FactoringError;
pub use popsim_error::{PopsimError, PopsimResult};
