//! # popsim-factoring
//!
//! Meta control factoring. Controls known only for coarse meta zones are
//! split across their seed zones in proportion to the preliminary balanced
//! household weights, then appended to each seed zone's own controls for
//! final balancing.

pub mod engine;
pub mod frame;
pub mod table;

pub use engine::{MetaControlFactoring, SeedMetaControls};
pub use frame::HouseholdFrame;
pub use table::ControlTable;
