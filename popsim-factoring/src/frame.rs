use ndarray::Array2;
use popsim_core::errors::FactoringError;

/// Household-level inputs to factoring, one row per household.
#[derive(Debug, Clone)]
pub struct HouseholdFrame {
    pub seed_zone: Vec<u32>,
    pub meta_zone: Vec<u32>,
    /// Weights from the preliminary seed-level balancing.
    pub preliminary_weight: Vec<f64>,
    /// Meta target names, one per incidence column.
    pub targets: Vec<String>,
    /// Household × meta target incidence.
    pub incidence: Array2<f64>,
}

impl HouseholdFrame {
    pub fn household_count(&self) -> usize {
        self.incidence.nrows()
    }

    pub fn target_count(&self) -> usize {
        self.incidence.ncols()
    }

    /// Check that every per-household column has one entry per incidence row.
    pub fn validate(&self) -> Result<(), FactoringError> {
        let households = self.household_count();
        for (what, got) in [
            ("seed zone column", self.seed_zone.len()),
            ("meta zone column", self.meta_zone.len()),
            ("preliminary weight column", self.preliminary_weight.len()),
        ] {
            if got != households {
                return Err(FactoringError::DimensionMismatch {
                    what,
                    expected: households,
                    got,
                });
            }
        }
        if self.targets.len() != self.target_count() {
            return Err(FactoringError::DimensionMismatch {
                what: "meta target names",
                expected: self.target_count(),
                got: self.targets.len(),
            });
        }
        Ok(())
    }
}
