//! One Gauss-Seidel sweep over the controls.

use ndarray::{Array2, ArrayView1};
use popsim_core::config::BalancerConfig;
use tracing::warn;

use crate::relaxation::{self, ImportanceSchedule};
use crate::state::BalanceState;

/// Correction factor for one control from the current weights.
///
/// ```text
/// xx      = Σ w[s] · a[s]
/// yy      = Σ w[s] · a[s]²
/// relaxed = max(constraint · relaxation, min_control_value)
/// gamma   = 1 - (xx - relaxed) / (yy + relaxed / importance)
/// ```
///
/// Returns 1.0 when no weight participates (`xx == 0`). Fractional incidence
/// far above target can make gamma zero or negative.
pub fn control_gamma(
    weights: &[f64],
    incidence: ArrayView1<'_, f64>,
    constraint: f64,
    relaxation_factor: f64,
    effective_importance: f64,
    min_control_value: f64,
) -> f64 {
    let (xx, yy) = weights
        .iter()
        .zip(incidence.iter())
        .fold((0.0, 0.0), |(xx, yy), (&w, &a)| (xx + w * a, yy + w * a * a));

    if xx > 0.0 {
        let relaxed = (constraint * relaxation_factor).max(min_control_value);
        1.0 - (xx - relaxed) / (yy + relaxed / effective_importance)
    } else {
        1.0
    }
}

/// Scale the weights of every participating sample by `gamma`, then clip
/// all weights into their bounds.
pub fn apply_gamma(state: &mut BalanceState, incidence: ArrayView1<'_, f64>, gamma: f64) {
    for (w, &a) in state.weights.current.iter_mut().zip(incidence.iter()) {
        if a > 0.0 {
            *w *= gamma;
        }
    }
    // Earlier controls in this sweep may have pushed non-participants out too.
    state.weights.clip();
}

/// Run one sweep in `order`, updating weights and relaxation factors in
/// place. Returns the gamma of every control; controls not visited keep 1.0.
pub fn run_sweep(
    state: &mut BalanceState,
    incidence: &Array2<f64>,
    order: &[usize],
    schedule: &ImportanceSchedule,
    config: &BalancerConfig,
) -> Vec<f64> {
    let mut gamma = vec![1.0; state.controls.len()];

    for &c in order {
        let column = incidence.column(c);
        let importance = schedule.effective_importance(
            state.controls.importance[c],
            state.master_control == Some(c),
        );

        gamma[c] = control_gamma(
            &state.weights.current,
            column,
            state.controls.constraint[c],
            state.controls.relaxation_factor[c],
            importance,
            config.min_control_value,
        );
        if gamma[c] <= 0.0 {
            warn!(
                control = c,
                gamma = gamma[c],
                "non-positive gamma; relaxation factor will be pinned to its maximum"
            );
        }
        apply_gamma(state, column, gamma[c]);

        state.controls.relaxation_factor[c] =
            relaxation::relax(state.controls.relaxation_factor[c], gamma[c], importance);
    }

    relaxation::clamp_relaxation(
        &mut state.controls.relaxation_factor,
        config.maximum_relaxation_factor,
    );
    gamma
}
