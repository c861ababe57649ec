use crate::errors::BalanceError;
use crate::models::{BalanceOptions, BalanceOutcome, BalanceProblem};

/// List balancing: fit per-sample weights to a set of control totals.
pub trait IBalancer: Send + Sync {
    /// Run one balancing call. Exhausting the iteration budget is reported
    /// in the returned status, never as an error.
    fn balance(
        &self,
        problem: &BalanceProblem,
        options: &BalanceOptions,
    ) -> Result<BalanceOutcome, BalanceError>;
}
