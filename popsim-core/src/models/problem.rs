use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::errors::BalanceError;

/// One balancing problem: a sample × control incidence matrix, one target
/// per control and one starting weight per sample.
///
/// Column order defines control identity and the nominal sweep order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceProblem {
    /// Rows are samples, columns are controls.
    pub incidence: Array2<f64>,
    /// Informational control names, one per column.
    pub control_names: Vec<String>,
    /// Target totals, one per column.
    pub constraints: Vec<f64>,
    /// Starting weights, one per row.
    pub initial_weights: Vec<f64>,
}

impl BalanceProblem {
    /// Build a problem with default control names (`control_0`, `control_1`, ...).
    pub fn new(incidence: Array2<f64>, constraints: Vec<f64>, initial_weights: Vec<f64>) -> Self {
        let control_names = (0..incidence.ncols())
            .map(|c| format!("control_{c}"))
            .collect();
        Self {
            incidence,
            control_names,
            constraints,
            initial_weights,
        }
    }

    /// Build a problem from row-major incidence rows.
    pub fn from_rows(
        rows: &[Vec<f64>],
        constraints: Vec<f64>,
        initial_weights: Vec<f64>,
    ) -> Result<Self, BalanceError> {
        let ncols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != ncols) {
            return Err(BalanceError::DimensionMismatch {
                what: "incidence row",
                expected: ncols,
                got: bad.len(),
            });
        }
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        let incidence = Array2::from_shape_vec((rows.len(), ncols), flat).map_err(|_| {
            BalanceError::DimensionMismatch {
                what: "incidence",
                expected: rows.len() * ncols,
                got: rows.iter().map(Vec::len).sum(),
            }
        })?;
        Ok(Self::new(incidence, constraints, initial_weights))
    }

    /// Replace the informational control names.
    pub fn with_control_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.control_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn sample_count(&self) -> usize {
        self.incidence.nrows()
    }

    pub fn control_count(&self) -> usize {
        self.incidence.ncols()
    }
}

/// A weight bound given either once for every sample or per sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeightBound {
    Scalar(f64),
    PerSample(Vec<f64>),
}

impl WeightBound {
    /// Expand to one value per sample.
    pub fn resolve(&self, sample_count: usize, what: &'static str) -> Result<Vec<f64>, BalanceError> {
        match self {
            Self::Scalar(v) => Ok(vec![*v; sample_count]),
            Self::PerSample(values) if values.len() == sample_count => Ok(values.clone()),
            Self::PerSample(values) => Err(BalanceError::DimensionMismatch {
                what,
                expected: sample_count,
                got: values.len(),
            }),
        }
    }
}

impl From<f64> for WeightBound {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<Vec<f64>> for WeightBound {
    fn from(values: Vec<f64>) -> Self {
        Self::PerSample(values)
    }
}

/// Optional per-call inputs. Every field falls back to a documented default
/// when `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceOptions {
    /// Per-control importance; uniform importance when absent.
    pub control_importance: Option<Vec<f64>>,
    /// Lower weight bound; 0 when absent.
    pub lower_bound: Option<WeightBound>,
    /// Upper weight bound; the configured sentinel when absent.
    pub upper_bound: Option<WeightBound>,
    /// Control processed last in every sweep and exempt from importance decay.
    pub master_control: Option<usize>,
    /// Overrides the configured sweep budget.
    pub max_iterations: Option<usize>,
}

impl BalanceOptions {
    pub fn with_importance(mut self, importance: Vec<f64>) -> Self {
        self.control_importance = Some(importance);
        self
    }

    pub fn with_lower_bound(mut self, bound: impl Into<WeightBound>) -> Self {
        self.lower_bound = Some(bound.into());
        self
    }

    pub fn with_upper_bound(mut self, bound: impl Into<WeightBound>) -> Self {
        self.upper_bound = Some(bound.into());
        self
    }

    pub fn with_master_control(mut self, index: usize) -> Self {
        self.master_control = Some(index);
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }
}
