use serde::{Deserialize, Serialize};

/// Final weight for one sample, paired with its starting weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightRecord {
    pub initial: f64,
    #[serde(rename = "final")]
    pub final_weight: f64,
}

/// Per-control result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlSummary {
    pub name: String,
    /// Target after flooring at the minimum control value.
    pub constraint: f64,
    pub relaxation_factor: f64,
    /// `constraint × relaxation_factor`.
    pub relaxed_constraint: f64,
    /// Achieved weighted total, rounded to 2 decimals.
    pub weighted_sum: f64,
}

/// How the iteration loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceStatus {
    pub converged: bool,
    /// Zero-based index of the last sweep executed.
    pub iterations_run: usize,
    /// Mean absolute weight movement over the last sweep.
    pub delta: f64,
    /// Largest `|gamma - 1|` over the last sweep.
    pub max_gamma_dif: f64,
}

/// Everything a balancing call returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceOutcome {
    pub weights: Vec<WeightRecord>,
    pub controls: Vec<ControlSummary>,
    pub status: BalanceStatus,
}

impl BalanceOutcome {
    /// Final weights in sample order.
    pub fn final_weights(&self) -> Vec<f64> {
        self.weights.iter().map(|w| w.final_weight).collect()
    }
}
