//! Problem-level parallelism: independent problems balanced concurrently.

use popsim_core::errors::BalanceError;
use popsim_core::models::{BalanceOptions, BalanceOutcome, BalanceProblem};
use popsim_core::traits::IBalancer;
use rayon::prelude::*;
use tracing::debug;

/// Balance every problem on the rayon pool.
///
/// Results come back in input order, one per problem; a contract violation
/// in one problem does not affect the others.
pub fn balance_all<B>(
    balancer: &B,
    problems: &[(BalanceProblem, BalanceOptions)],
) -> Vec<Result<BalanceOutcome, BalanceError>>
where
    B: IBalancer + ?Sized,
{
    debug!(problem_count = problems.len(), "balancing problems in parallel");
    problems
        .par_iter()
        .map(|(problem, options)| balancer.balance(problem, options))
        .collect()
}
