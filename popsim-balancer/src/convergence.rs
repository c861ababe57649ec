//! Convergence measurement after each sweep.

use crate::state::SampleWeights;

/// Movement observed over one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SweepMeasure {
    /// Mean absolute change of the working weights.
    pub delta: f64,
    /// Largest `|gamma - 1|` over all controls.
    pub max_gamma_dif: f64,
}

impl SweepMeasure {
    /// Measure a finished sweep against the previous snapshot.
    pub fn measure(gamma: &[f64], weights: &SampleWeights) -> Self {
        let max_gamma_dif = gamma
            .iter()
            .map(|g| (g - 1.0).abs())
            .fold(0.0, f64::max);

        let moved: f64 = weights
            .current
            .iter()
            .zip(&weights.previous)
            .map(|(c, p)| (c - p).abs())
            .sum();

        Self {
            delta: moved / weights.len() as f64,
            max_gamma_dif,
        }
    }

    /// Both the weights and the corrections have stopped moving.
    pub fn is_converged(&self, max_gap: f64) -> bool {
        self.delta < max_gap && self.max_gamma_dif < max_gap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights(previous: Vec<f64>, current: Vec<f64>) -> SampleWeights {
        let n = current.len();
        SampleWeights {
            initial: previous.clone(),
            lower: vec![0.0; n],
            upper: vec![f64::MAX; n],
            current,
            previous,
        }
    }

    #[test]
    fn delta_is_mean_absolute_movement() {
        let w = weights(vec![1.0, 2.0, 3.0, 4.0], vec![2.0, 2.0, 1.0, 4.0]);
        let m = SweepMeasure::measure(&[1.0, 1.0], &w);
        assert_eq!(m.delta, 0.75);
        assert_eq!(m.max_gamma_dif, 0.0);
    }

    #[test]
    fn max_gamma_dif_takes_largest_deviation() {
        let w = weights(vec![1.0], vec![1.0]);
        let m = SweepMeasure::measure(&[1.1, 0.7, 1.0], &w);
        assert!((m.max_gamma_dif - 0.3).abs() < 1e-12);
    }

    #[test]
    fn convergence_needs_both_gaps_small() {
        let gap = 1e-9;
        assert!(SweepMeasure { delta: 0.0, max_gamma_dif: 0.0 }.is_converged(gap));
        assert!(!SweepMeasure { delta: 1e-6, max_gamma_dif: 0.0 }.is_converged(gap));
        assert!(!SweepMeasure { delta: 0.0, max_gamma_dif: 1e-6 }.is_converged(gap));
    }
}
