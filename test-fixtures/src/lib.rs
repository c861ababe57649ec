//! Test fixture loader for popsim golden balancing and factoring problems.
//!
//! Provides typed deserialization of the fixture JSON files and helper
//! functions for loading them in tests across crates.

use std::path::PathBuf;

use popsim_core::models::{BalanceOptions, BalanceProblem};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .unwrap_or_else(|_| env!("CARGO_MANIFEST_DIR").to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").join("balancing").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// List all JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    let Ok(entries) = std::fs::read_dir(&dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

/// A golden balancing problem with its expected outcome.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceFixture {
    pub name: String,
    /// Row-major incidence, one row per sample.
    pub incidence: Vec<Vec<f64>>,
    #[serde(default)]
    pub control_names: Option<Vec<String>>,
    pub constraints: Vec<f64>,
    pub initial_weights: Vec<f64>,
    #[serde(default)]
    pub options: BalanceOptions,
    pub expected: ExpectedBalance,
}

/// Expected outcome of a [`BalanceFixture`].
#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedBalance {
    pub converged: bool,
    /// Upper limit on the reported zero-based last iteration.
    pub max_iterations_run: usize,
    pub final_weights: Vec<f64>,
    #[serde(default)]
    pub relaxation_factors: Option<Vec<f64>>,
    pub tolerance: f64,
}

impl BalanceFixture {
    /// Build the engine input described by this fixture.
    ///
    /// # Panics
    /// Panics if the incidence rows are ragged.
    pub fn problem(&self) -> BalanceProblem {
        let problem = BalanceProblem::from_rows(
            &self.incidence,
            self.constraints.clone(),
            self.initial_weights.clone(),
        )
        .unwrap_or_else(|e| panic!("Fixture {} has a malformed incidence: {}", self.name, e));
        match &self.control_names {
            Some(names) => problem.with_control_names(names.iter().cloned()),
            None => problem,
        }
    }
}

/// Load a balancing fixture by file name from `balancing/`.
pub fn load_balance_fixture(file_name: &str) -> BalanceFixture {
    load_fixture(&format!("balancing/{file_name}"))
}

/// Load every balancing fixture.
pub fn all_balance_fixtures() -> Vec<BalanceFixture> {
    list_fixtures("balancing")
        .iter()
        .map(|p| {
            let content = std::fs::read_to_string(p)
                .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", p.display(), e));
            serde_json::from_str(&content)
                .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", p.display(), e))
        })
        .collect()
}
