use std::collections::BTreeMap;

use popsim_core::errors::FactoringError;
use serde::{Deserialize, Serialize};

/// Per-zone control totals with named columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlTable {
    pub names: Vec<String>,
    /// Zone id to one value per name.
    pub rows: BTreeMap<u32, Vec<f64>>,
}

impl ControlTable {
    pub fn new(names: Vec<String>) -> Self {
        Self {
            names,
            rows: BTreeMap::new(),
        }
    }

    /// Insert or replace a zone's row.
    pub fn insert(&mut self, zone: u32, values: Vec<f64>) -> Result<(), FactoringError> {
        if values.len() != self.names.len() {
            return Err(FactoringError::DimensionMismatch {
                what: "control row",
                expected: self.names.len(),
                got: values.len(),
            });
        }
        self.rows.insert(zone, values);
        Ok(())
    }

    /// Constraints for one zone, in column order.
    pub fn constraints(&self, zone: u32) -> Option<&[f64]> {
        self.rows.get(&zone).map(Vec::as_slice)
    }

    /// Single value by zone and column name.
    pub fn value(&self, zone: u32, name: &str) -> Option<f64> {
        let col = self.names.iter().position(|n| n == name)?;
        self.rows.get(&zone)?.get(col).copied()
    }

    /// Rows that arrived through deserialization bypass `insert`.
    fn check_row_lengths(&self) -> Result<(), FactoringError> {
        for row in self.rows.values() {
            if row.len() != self.names.len() {
                return Err(FactoringError::DimensionMismatch {
                    what: "control row",
                    expected: self.names.len(),
                    got: row.len(),
                });
            }
        }
        Ok(())
    }

    /// Concatenate `meta` onto these seed controls and reorder the columns
    /// to `order`. Both tables must cover the same seed zones and every row
    /// must have one value per name.
    pub fn append_meta_controls(
        &self,
        meta: &ControlTable,
        order: &[String],
    ) -> Result<ControlTable, FactoringError> {
        self.check_row_lengths()?;
        meta.check_row_lengths()?;
        for zone in self.rows.keys() {
            if !meta.rows.contains_key(zone) {
                return Err(FactoringError::UnknownSeedZone {
                    seed_zone: *zone,
                    what: "meta controls",
                });
            }
        }
        for zone in meta.rows.keys() {
            if !self.rows.contains_key(zone) {
                return Err(FactoringError::UnknownSeedZone {
                    seed_zone: *zone,
                    what: "seed controls",
                });
            }
        }

        let mut merged = ControlTable::new(order.to_vec());
        for (&zone, seed_row) in &self.rows {
            let meta_row = &meta.rows[&zone];
            let row = order
                .iter()
                .map(|name| {
                    lookup(&self.names, seed_row, name)
                        .or_else(|| lookup(&meta.names, meta_row, name))
                        .ok_or_else(|| FactoringError::MissingControl {
                            seed_zone: zone,
                            name: name.clone(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            merged.rows.insert(zone, row);
        }
        Ok(merged)
    }
}

fn lookup(names: &[String], row: &[f64], name: &str) -> Option<f64> {
    row.get(names.iter().position(|n| n == name)?).copied()
}
