//! ListBalancer: runs the sweep loop and assembles the outcome.

use ndarray::Array2;
use popsim_core::config::BalancerConfig;
use popsim_core::errors::{BalanceError, ConfigError};
use popsim_core::models::{
    BalanceOptions, BalanceOutcome, BalanceProblem, BalanceStatus, ControlSummary, WeightRecord,
};
use popsim_core::traits::IBalancer;
use tracing::{debug, info, trace, warn};

use crate::convergence::SweepMeasure;
use crate::relaxation::ImportanceSchedule;
use crate::state::BalanceState;
use crate::sweep;

/// Relaxed, importance-weighted list balancer.
///
/// Each instance owns its tuning constants; calls share no mutable state,
/// so one balancer may serve many independent problems concurrently.
#[derive(Debug, Clone, Default)]
pub struct ListBalancer {
    config: BalancerConfig,
}

impl ListBalancer {
    pub fn new(config: BalancerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BalancerConfig {
        &self.config
    }

    /// Balance and call `observer` after every sweep with the iteration
    /// index, the post-sweep state and the sweep's measure.
    pub fn balance_with_observer<F>(
        &self,
        problem: &BalanceProblem,
        options: &BalanceOptions,
        mut observer: F,
    ) -> Result<BalanceOutcome, BalanceError>
    where
        F: FnMut(usize, &BalanceState, &SweepMeasure),
    {
        self.config.validate()?;
        let max_iterations = options.max_iterations.unwrap_or(self.config.max_iterations);
        if max_iterations == 0 {
            return Err(BalanceError::Config(ConfigError::InvalidValue {
                field: "max_iterations".to_string(),
                message: "must be at least 1".to_string(),
            }));
        }

        let mut state = BalanceState::initialize(problem, options, &self.config)?;
        let span = popsim_core::balance_span!(problem.sample_count(), problem.control_count());
        let _guard = span.enter();

        let order: Vec<usize> = state.sweep_order().collect();
        let mut schedule = ImportanceSchedule::new(&self.config);
        let mut measure = SweepMeasure::default();
        let mut converged = false;
        let mut iterations_run = 0;

        for iteration in 0..max_iterations {
            iterations_run = iteration;

            if schedule.advance(iteration) {
                debug!(
                    iteration,
                    adjustment = schedule.adjustment(),
                    "importance adjustment decayed"
                );
            }

            let gamma =
                sweep::run_sweep(&mut state, &problem.incidence, &order, &schedule, &self.config);
            measure = SweepMeasure::measure(&gamma, &state.weights);
            state.weights.snapshot();

            trace!(
                iteration,
                delta = measure.delta,
                max_gamma_dif = measure.max_gamma_dif,
                "sweep finished"
            );
            observer(iteration, &state, &measure);

            converged = measure.is_converged(self.config.max_gap);
            if converged {
                break;
            }
        }

        if converged {
            info!(iterations_run, delta = measure.delta, "balancing converged");
        } else {
            warn!(
                max_iterations,
                delta = measure.delta,
                max_gamma_dif = measure.max_gamma_dif,
                "balancing did not converge within the iteration budget"
            );
        }

        Ok(assemble(
            &state,
            &problem.incidence,
            BalanceStatus {
                converged,
                iterations_run,
                delta: measure.delta,
                max_gamma_dif: measure.max_gamma_dif,
            },
        ))
    }
}

impl IBalancer for ListBalancer {
    fn balance(
        &self,
        problem: &BalanceProblem,
        options: &BalanceOptions,
    ) -> Result<BalanceOutcome, BalanceError> {
        self.balance_with_observer(problem, options, |_, _, _| {})
    }
}

fn assemble(state: &BalanceState, incidence: &Array2<f64>, status: BalanceStatus) -> BalanceOutcome {
    let weights = state
        .weights
        .initial
        .iter()
        .zip(&state.weights.current)
        .map(|(&initial, &final_weight)| WeightRecord {
            initial,
            final_weight,
        })
        .collect();

    let controls = (0..state.controls.len())
        .map(|c| {
            let constraint = state.controls.constraint[c];
            let relaxation_factor = state.controls.relaxation_factor[c];
            let weighted_sum: f64 = incidence
                .column(c)
                .iter()
                .zip(&state.weights.current)
                .map(|(a, w)| a * w)
                .sum();
            ControlSummary {
                name: state.controls.names[c].clone(),
                constraint,
                relaxation_factor,
                relaxed_constraint: constraint * relaxation_factor,
                weighted_sum: round2(weighted_sum),
            }
        })
        .collect();

    BalanceOutcome {
        weights,
        controls,
        status,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
