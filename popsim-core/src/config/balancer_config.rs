use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Balancer tuning constants.
///
/// Held by each engine instance rather than as process-wide state, so
/// concurrent balancing calls may run with different tolerances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalancerConfig {
    /// Sweep budget per balancing call.
    pub max_iterations: usize,
    /// Convergence threshold for both mean weight movement and gamma deviation.
    pub max_gap: f64,
    /// Divisor applied to the importance adjustment at each decay step.
    pub importance_adjust: f64,
    /// Number of iterations between importance decay steps.
    pub importance_adjust_count: usize,
    /// Floor for control importance, also the floor of the effective importance.
    pub minimum_importance: f64,
    /// Ceiling for every control's relaxation factor.
    pub maximum_relaxation_factor: f64,
    /// Floor for constraints and relaxed constraints.
    pub min_control_value: f64,
    /// Upper-bound sentinel used when no upper bound is supplied.
    pub max_weight: f64,
}

impl Default for BalancerConfig {
    fn default() -> Self {
        Self {
            max_iterations: defaults::DEFAULT_MAX_ITERATIONS,
            max_gap: defaults::DEFAULT_MAX_GAP,
            importance_adjust: defaults::DEFAULT_IMPORTANCE_ADJUST,
            importance_adjust_count: defaults::DEFAULT_IMPORTANCE_ADJUST_COUNT,
            minimum_importance: defaults::DEFAULT_MINIMUM_IMPORTANCE,
            maximum_relaxation_factor: defaults::DEFAULT_MAXIMUM_RELAXATION_FACTOR,
            min_control_value: defaults::DEFAULT_MIN_CONTROL_VALUE,
            max_weight: defaults::DEFAULT_MAX_WEIGHT,
        }
    }
}

impl BalancerConfig {
    /// Check that every constant keeps the update denominator positive and
    /// the loop bounded.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(invalid("balancer.max_iterations", "must be at least 1"));
        }
        if self.importance_adjust_count == 0 {
            return Err(invalid(
                "balancer.importance_adjust_count",
                "must be at least 1",
            ));
        }
        if !(self.importance_adjust.is_finite() && self.importance_adjust > 1.0) {
            return Err(invalid(
                "balancer.importance_adjust",
                "must be a finite value greater than 1",
            ));
        }
        for (field, value) in [
            ("balancer.max_gap", self.max_gap),
            ("balancer.minimum_importance", self.minimum_importance),
            (
                "balancer.maximum_relaxation_factor",
                self.maximum_relaxation_factor,
            ),
            ("balancer.min_control_value", self.min_control_value),
            ("balancer.max_weight", self.max_weight),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, "must be a finite positive number"));
            }
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}
