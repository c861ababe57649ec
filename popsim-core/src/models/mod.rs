mod outcome;
mod problem;

pub use outcome::{BalanceOutcome, BalanceStatus, ControlSummary, WeightRecord};
pub use problem::{BalanceOptions, BalanceProblem, WeightBound};
