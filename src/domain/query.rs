// ============================================================
// Layer 3 — Query Domain Type
// ============================================================
// A prediction request names its input sources explicitly.
// The predictor pattern-matches on the variant, so "which
// classifiers run" is decided by the type, not by probing
// optional arguments for emptiness.

use anyhow::{bail, Result};
use std::path::PathBuf;

use crate::domain::features::FeatureVector;

/// The input sources for one prediction request.
#[derive(Debug, Clone)]
pub enum Query {
    /// Photo only
    Image(PathBuf),

    /// Questionnaire only
    Features(FeatureVector),

    /// Photo and questionnaire together
    Both(PathBuf, FeatureVector),
}

impl Query {
    /// Build a query from the optional CLI inputs.
    /// At least one source must be present.
    pub fn from_options(
        image:    Option<PathBuf>,
        features: Option<FeatureVector>,
    ) -> Result<Self> {
        match (image, features) {
            (Some(path), Some(fv)) => Ok(Query::Both(path, fv)),
            (Some(path), None)     => Ok(Query::Image(path)),
            (None, Some(fv))       => Ok(Query::Features(fv)),
            (None, None) => {
                bail!("a query needs at least one input: a photo, trait scores, or both")
            }
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_sources_build_both_variant() {
        let fv = FeatureVector::from_pairs([("lojalnosc".to_string(), 50.0)]);
        let q  = Query::from_options(Some(PathBuf::from("cat.jpg")), Some(fv)).unwrap();
        assert!(matches!(q, Query::Both(..)));
    }

    #[test]
    fn test_no_sources_is_an_error() {
        assert!(Query::from_options(None, None).is_err());
    }

    #[test]
    fn test_one_source_builds_the_matching_variant() {
        let q = Query::from_options(Some(PathBuf::from("cat.jpg")), None).unwrap();
        assert!(matches!(q, Query::Image(_)));

        let fv = FeatureVector::from_pairs([("lojalnosc".to_string(), 50.0)]);
        let q  = Query::from_options(None, Some(fv)).unwrap();
        assert!(matches!(q, Query::Features(_)));
    }
}
