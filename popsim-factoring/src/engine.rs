//! MetaControlFactoring: seed-level meta controls from meta-level totals.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use popsim_core::config::{FactoringConfig, RoundingPolicy};
use popsim_core::errors::FactoringError;
use tracing::debug;

use crate::frame::HouseholdFrame;
use crate::table::ControlTable;

/// Result of factoring.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedMetaControls {
    /// Seed zone to one factored control per meta target.
    pub controls: ControlTable,
    /// Meta zone to `meta control / factored meta weight` per target.
    pub meta_factors: ControlTable,
    /// Meta zone containing each seed zone.
    pub seed_to_meta: BTreeMap<u32, u32>,
}

/// Distributes meta-zone controls to seed zones.
///
/// ```text
/// seedWeight[seed, t] = Σ_{h ∈ seed} incidence[h, t] × preliminaryWeight[h]
/// metaWeight[meta, t] = Σ_{seed ∈ meta} seedWeight[seed, t]
/// factor[meta, t]     = metaControl[meta, t] / metaWeight[meta, t]
/// seedControl[seed,t] = round(seedWeight[seed, t] × factor[meta(seed), t])
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetaControlFactoring {
    rounding: RoundingPolicy,
}

impl MetaControlFactoring {
    pub fn new(config: &FactoringConfig) -> Self {
        Self {
            rounding: config.rounding,
        }
    }

    pub fn rounding(&self) -> RoundingPolicy {
        self.rounding
    }

    /// Factor `meta_controls` (keyed by meta zone) down to seed zones.
    pub fn factor(
        &self,
        frame: &HouseholdFrame,
        meta_controls: &ControlTable,
    ) -> Result<SeedMetaControls, FactoringError> {
        frame.validate()?;
        let span = popsim_core::factoring_span!(frame.household_count(), frame.target_count());
        let _guard = span.enter();

        let columns = frame
            .targets
            .iter()
            .map(|target| {
                meta_controls
                    .names
                    .iter()
                    .position(|n| n == target)
                    .ok_or_else(|| FactoringError::MissingTarget {
                        target: target.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let (seed_to_meta, seed_weights) = seed_level_weights(frame)?;

        let target_count = frame.target_count();
        let mut meta_weights: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
        for (seed, row) in &seed_weights {
            let sums = meta_weights
                .entry(seed_to_meta[seed])
                .or_insert_with(|| vec![0.0; target_count]);
            for (acc, v) in sums.iter_mut().zip(row) {
                *acc += v;
            }
        }

        let mut meta_factors = ControlTable::new(frame.targets.clone());
        for (&meta_zone, sums) in &meta_weights {
            let controls = meta_controls
                .rows
                .get(&meta_zone)
                .ok_or(FactoringError::MissingMetaControl { meta_zone })?;
            if controls.len() != meta_controls.names.len() {
                return Err(FactoringError::DimensionMismatch {
                    what: "meta control row",
                    expected: meta_controls.names.len(),
                    got: controls.len(),
                });
            }
            let factors = sums
                .iter()
                .zip(&columns)
                .zip(&frame.targets)
                .map(|((&weight, &col), target)| {
                    let control = controls[col];
                    if weight > 0.0 {
                        Ok(control / weight)
                    } else if control == 0.0 {
                        Ok(0.0)
                    } else {
                        Err(FactoringError::ZeroMetaWeight {
                            meta_zone,
                            target: target.clone(),
                            control,
                        })
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;
            meta_factors.insert(meta_zone, factors)?;
        }

        let mut controls = ControlTable::new(frame.targets.clone());
        for (&seed, row) in &seed_weights {
            let factors = &meta_factors.rows[&seed_to_meta[&seed]];
            let values = row
                .iter()
                .zip(factors)
                .map(|(w, f)| self.rounding.apply(w * f))
                .collect();
            controls.insert(seed, values)?;
        }

        debug!(
            seed_zones = controls.rows.len(),
            meta_zones = meta_factors.rows.len(),
            rounding = %self.rounding,
            "meta controls factored to seed zones"
        );

        Ok(SeedMetaControls {
            controls,
            meta_factors,
            seed_to_meta,
        })
    }
}

type SeedWeights = BTreeMap<u32, Vec<f64>>;

/// Sum household factored weights per seed zone and map each seed zone to
/// its single meta zone.
fn seed_level_weights(
    frame: &HouseholdFrame,
) -> Result<(BTreeMap<u32, u32>, SeedWeights), FactoringError> {
    let target_count = frame.target_count();
    let mut seed_to_meta = BTreeMap::new();
    let mut seed_weights: SeedWeights = BTreeMap::new();

    for (h, incidence) in frame.incidence.rows().into_iter().enumerate() {
        let seed = frame.seed_zone[h];
        let meta = frame.meta_zone[h];
        match seed_to_meta.entry(seed) {
            Entry::Vacant(e) => {
                e.insert(meta);
            }
            Entry::Occupied(e) if *e.get() != meta => {
                return Err(FactoringError::SeedZoneMismatch {
                    seed_zone: seed,
                    first: *e.get(),
                    second: meta,
                });
            }
            Entry::Occupied(_) => {}
        }

        let weight = frame.preliminary_weight[h];
        let sums = seed_weights
            .entry(seed)
            .or_insert_with(|| vec![0.0; target_count]);
        for (acc, a) in sums.iter_mut().zip(incidence.iter()) {
            *acc += a * weight;
        }
    }
    Ok((seed_to_meta, seed_weights))
}
