// ============================================================
// Layer 4 — Median Imputer
// ============================================================
// Fills missing trait values with the per-trait median observed
// in the training table. Fitted once during training, persisted
// as JSON next to the model, and reloaded for inference so both
// phases impute identically.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::data::feature_dataset::FeatureTable;

/// Per-trait medians, aligned to the trained trait order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedianImputer {
    medians: Vec<f64>,
}

impl MedianImputer {
    /// Compute the median of every trait column. A column with
    /// no numeric values at all cannot be imputed and fails the
    /// fit, naming the trait.
    pub fn fit(table: &FeatureTable) -> Result<Self> {
        let mut medians = Vec::with_capacity(table.trait_names.len());

        for (col, name) in table.trait_names.iter().enumerate() {
            let mut present: Vec<f64> = table
                .records
                .iter()
                .filter_map(|r| r.values[col])
                .collect();

            if present.is_empty() {
                bail!("trait column '{name}' has no numeric values, cannot compute a median");
            }

            present.sort_by(|a, b| a.total_cmp(b));
            medians.push(median_of_sorted(&present));
        }

        Ok(Self { medians })
    }

    /// Replace every missing value with the stored median.
    /// `values` must be aligned to the fitted trait order.
    pub fn transform(&self, values: &[Option<f64>]) -> Vec<f64> {
        values
            .iter()
            .zip(&self.medians)
            .map(|(v, median)| v.unwrap_or(*median))
            .collect()
    }

    pub fn medians(&self) -> &[f64] {
        &self.medians
    }
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::feature_dataset::FeatureRecord;

    fn table(rows: Vec<Vec<Option<f64>>>) -> FeatureTable {
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        FeatureTable {
            trait_names: (0..width).map(|i| format!("t{i}")).collect(),
            records: rows
                .into_iter()
                .map(|values| FeatureRecord { label: "pies".to_string(), values })
                .collect(),
        }
    }

    #[test]
    fn test_odd_count_median() {
        let t = table(vec![
            vec![Some(10.0)],
            vec![Some(30.0)],
            vec![Some(20.0)],
        ]);
        let imputer = MedianImputer::fit(&t).unwrap();
        assert_eq!(imputer.medians(), &[20.0]);
    }

    #[test]
    fn test_even_count_median_averages_middles() {
        let t = table(vec![
            vec![Some(10.0)],
            vec![Some(20.0)],
            vec![Some(30.0)],
            vec![Some(40.0)],
        ]);
        let imputer = MedianImputer::fit(&t).unwrap();
        assert_eq!(imputer.medians(), &[25.0]);
    }

    #[test]
    fn test_missing_values_are_skipped_when_fitting() {
        let t = table(vec![
            vec![Some(10.0)],
            vec![None],
            vec![Some(50.0)],
        ]);
        let imputer = MedianImputer::fit(&t).unwrap();
        assert_eq!(imputer.medians(), &[30.0]);
    }

    #[test]
    fn test_all_missing_column_fails_with_trait_name() {
        let t = table(vec![vec![Some(1.0), None], vec![Some(2.0), None]]);
        let err = MedianImputer::fit(&t).unwrap_err();
        assert!(err.to_string().contains("t1"));
    }

    #[test]
    fn test_transform_fills_only_missing() {
        let t = table(vec![
            vec![Some(10.0), Some(100.0)],
            vec![Some(20.0), Some(200.0)],
            vec![Some(30.0), Some(300.0)],
        ]);
        let imputer = MedianImputer::fit(&t).unwrap();
        let dense = imputer.transform(&[None, Some(42.0)]);
        assert_eq!(dense, vec![20.0, 42.0]);
    }
}
