// ============================================================
// Layer 3 — Feature Vector Domain Type
// ============================================================
// The questionnaire half of a query: named trait scores in the
// 0..=100 range, e.g. {"lojalnosc": 60, "towarzyskosc": 50}.
//
// The vocabulary of trait names is fixed by the training dataset.
// Keys the trained model does not know are discarded downstream;
// keys the model expects but the user omitted are imputed with
// the training-time median.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A user-supplied mapping of trait name to numeric score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureVector {
    traits: HashMap<String, f64>,
}

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a vector from (name, value) pairs. Later duplicates win.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self { traits: pairs.into_iter().collect() }
    }

    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.traits.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.traits.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.traits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traits.is_empty()
    }

    /// Reject inputs that must not reach the imputer: an empty map,
    /// or a value that is not a finite number. The error names the
    /// offending key. Keys are checked in sorted order so the same
    /// bad input always reports the same key.
    pub fn validate(&self) -> Result<()> {
        if self.traits.is_empty() {
            bail!("the feature map is empty: at least one trait score is required");
        }

        let mut keys: Vec<&String> = self.traits.keys().collect();
        keys.sort();

        for key in keys {
            let value = self.traits[key];
            if !value.is_finite() {
                bail!("invalid value for trait '{key}': {value} (expected a finite number)");
            }
        }
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_map_is_rejected() {
        let fv = FeatureVector::new();
        let err = fv.validate().unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_non_finite_value_names_the_key() {
        let mut fv = FeatureVector::new();
        fv.set("lojalnosc", 60.0);
        fv.set("lenistwo", f64::NAN);
        let err = fv.validate().unwrap_err();
        assert!(err.to_string().contains("lenistwo"));
    }

    #[test]
    fn test_infinite_value_is_rejected() {
        let mut fv = FeatureVector::new();
        fv.set("towarzyskosc", f64::INFINITY);
        assert!(fv.validate().is_err());
    }

    #[test]
    fn test_valid_vector_passes() {
        let fv = FeatureVector::from_pairs([
            ("lojalnosc".to_string(), 60.0),
            ("towarzyskosc".to_string(), 50.0),
        ]);
        assert!(fv.validate().is_ok());
        assert_eq!(fv.get("lojalnosc"), Some(60.0));
        assert_eq!(fv.len(), 2);
    }
}
