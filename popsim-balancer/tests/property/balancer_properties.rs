use ndarray::Array2;
use popsim_balancer::ListBalancer;
use popsim_core::models::{BalanceOptions, BalanceProblem};
use popsim_core::traits::IBalancer;
use proptest::prelude::*;

const SAMPLES: usize = 6;
const CONTROLS: usize = 3;

fn arb_problem() -> impl Strategy<Value = (BalanceProblem, BalanceOptions)> {
    (
        prop::collection::vec(0u8..=2, SAMPLES * CONTROLS),
        prop::collection::vec(1.0f64..50.0, CONTROLS),
        prop::collection::vec(0.5f64..5.0, SAMPLES),
        prop::collection::vec(0.0f64..1.0, SAMPLES),
        prop::collection::vec(2.0f64..10.0, SAMPLES),
        prop::option::of(0usize..CONTROLS),
        prop::collection::vec(1.0f64..10.0, CONTROLS),
    )
        .prop_map(|(cells, constraints, weights, lower, upper, master, importance)| {
            let incidence = Array2::from_shape_vec(
                (SAMPLES, CONTROLS),
                cells.into_iter().map(f64::from).collect(),
            )
            .unwrap();
            let mut options = BalanceOptions::default()
                .with_importance(importance)
                .with_lower_bound(lower)
                .with_upper_bound(upper)
                .with_max_iterations(250);
            options.master_control = master;
            (BalanceProblem::new(incidence, constraints, weights), options)
        })
}

// ── Bounds invariant ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn weights_stay_within_bounds_after_every_sweep((problem, options) in arb_problem()) {
        let mut violations = 0;
        ListBalancer::default()
            .balance_with_observer(&problem, &options, |_, state, _| {
                let w = &state.weights;
                for s in 0..w.len() {
                    if !(w.lower[s] <= w.current[s] && w.current[s] <= w.upper[s]) {
                        violations += 1;
                    }
                }
            })
            .unwrap();
        prop_assert_eq!(violations, 0);
    }
}

// ── Finite, capped output ────────────────────────────────────────────────

proptest! {
    #[test]
    fn outcome_is_finite_and_relaxation_capped((problem, options) in arb_problem()) {
        let outcome = ListBalancer::default().balance(&problem, &options).unwrap();
        prop_assert!(outcome.final_weights().iter().all(|w| w.is_finite()));
        prop_assert!(outcome.status.delta.is_finite());
        prop_assert!(outcome.status.iterations_run < 250);
        for control in &outcome.controls {
            prop_assert!(control.relaxation_factor.is_finite());
            prop_assert!(control.relaxation_factor > 0.0);
            prop_assert!(control.relaxation_factor <= 1_000_000.0);
            prop_assert!(control.constraint >= 0.1);
        }
    }
}

// ── Determinism ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn balancing_is_deterministic((problem, options) in arb_problem()) {
        let balancer = ListBalancer::default();
        let first = balancer.balance(&problem, &options).unwrap();
        let second = balancer.balance(&problem, &options).unwrap();
        prop_assert_eq!(first, second);
    }
}
