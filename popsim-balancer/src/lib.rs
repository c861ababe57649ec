//! # popsim-balancer
//!
//! List balancer: fits per-sample weights so that weighted incidence totals
//! match control targets within per-sample bounds.
//! Each sweep applies a damped Newton-like correction per control, relaxes
//! controls that resist correction, and decays the importance boost of
//! non-master controls over time.

pub mod batch;
pub mod convergence;
pub mod engine;
pub mod relaxation;
pub mod state;
pub mod sweep;

pub use batch::balance_all;
pub use engine::ListBalancer;
pub use state::BalanceState;
