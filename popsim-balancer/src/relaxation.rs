//! Relaxation factor adaptation and importance decay.

use popsim_core::config::BalancerConfig;

/// Importance boost shared by all non-master controls.
///
/// Starts at 1.0 and is divided by `importance_adjust` every
/// `importance_adjust_count` iterations, so late sweeps approach each
/// control's nominal importance.
#[derive(Debug, Clone)]
pub struct ImportanceSchedule {
    adjustment: f64,
    divisor: f64,
    period: usize,
    minimum: f64,
}

impl ImportanceSchedule {
    pub fn new(config: &BalancerConfig) -> Self {
        Self {
            adjustment: 1.0,
            divisor: config.importance_adjust,
            period: config.importance_adjust_count,
            minimum: config.minimum_importance,
        }
    }

    /// Current multiplier applied to non-master importance.
    pub fn adjustment(&self) -> f64 {
        self.adjustment
    }

    /// Called at the start of every iteration. Returns `true` when the
    /// adjustment decayed on this iteration.
    pub fn advance(&mut self, iteration: usize) -> bool {
        if iteration > 0 && iteration % self.period == 0 {
            self.adjustment /= self.divisor;
            true
        } else {
            false
        }
    }

    /// Importance used for one control update. The master control keeps its
    /// nominal importance.
    pub fn effective_importance(&self, nominal: f64, is_master: bool) -> f64 {
        if is_master {
            nominal
        } else {
            (nominal * self.adjustment).max(self.minimum)
        }
    }
}

/// Scale a relaxation factor by `(1 / gamma) ^ (1 / importance)`.
///
/// A control whose correction departed from 1 gets more slack; higher
/// importance keeps the slack smaller. A non-positive `gamma` gives NaN or
/// infinity here, which [`clamp_relaxation`] turns into the maximum.
pub fn relax(factor: f64, gamma: f64, effective_importance: f64) -> f64 {
    factor * (1.0 / gamma).powf(1.0 / effective_importance)
}

/// Cap every relaxation factor at `maximum`. NaN also becomes `maximum`.
pub fn clamp_relaxation(factors: &mut [f64], maximum: f64) {
    for f in factors.iter_mut() {
        *f = f.min(maximum);
    }
}
