//! Per-call balancing state, built once at engine entry.

use popsim_core::config::BalancerConfig;
use popsim_core::errors::BalanceError;
use popsim_core::models::{BalanceOptions, BalanceProblem};

/// Per-sample weight columns.
///
/// Invariant after every clip step: `lower[s] <= current[s] <= upper[s]`.
#[derive(Debug, Clone)]
pub struct SampleWeights {
    pub initial: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    /// Working weights, mutated by every control update.
    pub current: Vec<f64>,
    /// Snapshot of `current` at the end of the previous sweep.
    pub previous: Vec<f64>,
}

impl SampleWeights {
    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Clip every working weight into its bounds.
    pub fn clip(&mut self) {
        for ((w, lo), hi) in self
            .current
            .iter_mut()
            .zip(&self.lower)
            .zip(&self.upper)
        {
            *w = w.clamp(*lo, *hi);
        }
    }

    /// Record the current weights as the baseline for the next sweep.
    pub fn snapshot(&mut self) {
        self.previous.copy_from_slice(&self.current);
    }
}

/// Per-control columns.
#[derive(Debug, Clone)]
pub struct ControlState {
    pub names: Vec<String>,
    /// Targets floored at the minimum control value.
    pub constraint: Vec<f64>,
    pub relaxation_factor: Vec<f64>,
    /// Nominal importance floored at the minimum importance.
    pub importance: Vec<f64>,
}

impl ControlState {
    pub fn len(&self) -> usize {
        self.constraint.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraint.is_empty()
    }
}

/// Mutable state threaded through the iteration loop.
#[derive(Debug, Clone)]
pub struct BalanceState {
    pub weights: SampleWeights,
    pub controls: ControlState,
    /// Control swept last and exempt from importance decay.
    pub master_control: Option<usize>,
}

impl BalanceState {
    /// Validate the inputs and resolve every optional field to its
    /// effective full-length vector.
    pub fn initialize(
        problem: &BalanceProblem,
        options: &BalanceOptions,
        config: &BalancerConfig,
    ) -> Result<Self, BalanceError> {
        let sample_count = problem.sample_count();
        let control_count = problem.control_count();
        if sample_count == 0 || control_count == 0 {
            return Err(BalanceError::EmptyProblem);
        }

        check_len("constraints", control_count, problem.constraints.len())?;
        check_len("initial weights", sample_count, problem.initial_weights.len())?;
        check_len("control names", control_count, problem.control_names.len())?;

        for ((s, c), &value) in problem.incidence.indexed_iter() {
            if !(value.is_finite() && value >= 0.0) {
                return Err(BalanceError::InvalidIncidence {
                    sample: s,
                    control: c,
                    value,
                });
            }
        }
        for (s, &value) in problem.initial_weights.iter().enumerate() {
            if !(value.is_finite() && value >= 0.0) {
                return Err(BalanceError::InvalidWeight { sample: s, value });
            }
        }

        if let Some(index) = options.master_control {
            if index >= control_count {
                return Err(BalanceError::MasterControlOutOfRange {
                    index,
                    control_count,
                });
            }
        }

        let lower = match &options.lower_bound {
            Some(bound) => bound.resolve(sample_count, "lower bound")?,
            None => vec![0.0; sample_count],
        };
        let upper = match &options.upper_bound {
            Some(bound) => bound.resolve(sample_count, "upper bound")?,
            None => vec![config.max_weight; sample_count],
        };
        for (s, (&lo, &hi)) in lower.iter().zip(&upper).enumerate() {
            // NaN bounds fail this comparison too.
            if !(lo <= hi) {
                return Err(BalanceError::InvalidBounds {
                    sample: s,
                    lower: lo,
                    upper: hi,
                });
            }
        }

        let importance = match &options.control_importance {
            Some(given) => {
                check_len("control importance", control_count, given.len())?;
                given
                    .iter()
                    .map(|&i| i.max(config.minimum_importance))
                    .collect()
            }
            None => vec![1.0_f64.max(config.minimum_importance); control_count],
        };

        let constraint = problem
            .constraints
            .iter()
            .map(|&c| c.max(config.min_control_value))
            .collect();

        Ok(Self {
            weights: SampleWeights {
                initial: problem.initial_weights.clone(),
                lower,
                upper,
                current: problem.initial_weights.clone(),
                previous: problem.initial_weights.clone(),
            },
            controls: ControlState {
                names: problem.control_names.clone(),
                constraint,
                relaxation_factor: vec![1.0; control_count],
                importance,
            },
            master_control: options.master_control,
        })
    }

    /// Control indices in sweep order: every non-master control in column
    /// order, then the master control.
    pub fn sweep_order(&self) -> impl Iterator<Item = usize> + '_ {
        let master = self.master_control;
        (0..self.controls.len())
            .filter(move |&c| Some(c) != master)
            .chain(master)
    }
}

fn check_len(what: &'static str, expected: usize, got: usize) -> Result<(), BalanceError> {
    if expected == got {
        Ok(())
    } else {
        Err(BalanceError::DimensionMismatch {
            what,
            expected,
            got,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn problem() -> BalanceProblem {
        BalanceProblem::new(
            array![[1.0, 0.0, 1.0], [0.0, 1.0, 1.0]],
            vec![0.0, 5.0, -2.0],
            vec![1.0, 2.0],
        )
    }

    #[test]
    fn constraints_are_floored() {
        let state =
            BalanceState::initialize(&problem(), &BalanceOptions::default(), &BalancerConfig::default())
                .unwrap();
        assert_eq!(state.controls.constraint, vec![0.1, 5.0, 0.1]);
    }

    #[test]
    fn defaults_resolve_to_full_length_vectors() {
        let config = BalancerConfig::default();
        let state = BalanceState::initialize(&problem(), &BalanceOptions::default(), &config).unwrap();
        assert_eq!(state.weights.lower, vec![0.0, 0.0]);
        assert_eq!(state.weights.upper, vec![config.max_weight; 2]);
        assert_eq!(state.controls.importance, vec![1.0; 3]);
        assert_eq!(state.controls.relaxation_factor, vec![1.0; 3]);
        assert_eq!(state.weights.current, state.weights.initial);
        assert_eq!(state.weights.previous, state.weights.initial);
    }

    #[test]
    fn importance_is_floored() {
        let options = BalanceOptions::default().with_importance(vec![0.5, 3.0, 1.0]);
        let state =
            BalanceState::initialize(&problem(), &options, &BalancerConfig::default()).unwrap();
        assert_eq!(state.controls.importance, vec![1.0, 3.0, 1.0]);
    }

    #[test]
    fn sweep_order_moves_master_last() {
        let options = BalanceOptions::default().with_master_control(0);
        let state =
            BalanceState::initialize(&problem(), &options, &BalancerConfig::default()).unwrap();
        assert_eq!(state.sweep_order().collect::<Vec<_>>(), vec![1, 2, 0]);
    }

    #[test]
    fn sweep_order_without_master_is_column_order() {
        let state =
            BalanceState::initialize(&problem(), &BalanceOptions::default(), &BalancerConfig::default())
                .unwrap();
        assert_eq!(state.sweep_order().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn clip_enforces_bounds() {
        let options = BalanceOptions::default()
            .with_lower_bound(0.5)
            .with_upper_bound(vec![1.5, 1.5]);
        let mut state =
            BalanceState::initialize(&problem(), &options, &BalancerConfig::default()).unwrap();
        state.weights.current = vec![0.1, 9.0];
        state.weights.clip();
        assert_eq!(state.weights.current, vec![0.5, 1.5]);
    }

    #[test]
    fn snapshot_copies_current_weights() {
        let mut state =
            BalanceState::initialize(&problem(), &BalanceOptions::default(), &BalancerConfig::default())
                .unwrap();
        state.weights.current = vec![3.0, 4.0];
        state.weights.snapshot();
        assert_eq!(state.weights.previous, vec![3.0, 4.0]);
        assert_eq!(state.weights.initial, vec![1.0, 2.0]);
    }

    #[test]
    fn out_of_range_master_is_rejected() {
        let options = BalanceOptions::default().with_master_control(3);
        let err = BalanceState::initialize(&problem(), &options, &BalancerConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            BalanceError::MasterControlOutOfRange { index: 3, control_count: 3 }
        ));
    }
}
