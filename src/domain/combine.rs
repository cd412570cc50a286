// ============================================================
// Layer 3 — Ranking Combiner
// ============================================================
// Merges the two classifiers' ranked outputs into one top-5
// result. The rules:
//
//   - one non-empty source: its own top 5, scores untouched
//   - two sources: per label, image*w_image + features*w_features,
//     a label absent from one source contributes 0 from it
//   - no sources: an explicit error, never a silent empty list
//
// Accumulation preserves first-seen label order (image source
// first) and the final sort is stable, so equal combined scores
// tie-break by that order.

use anyhow::{bail, Result};
use std::collections::HashMap;

use crate::domain::prediction::{rank_top, Prediction};

/// How many labels a combined ranking may contain.
pub const TOP_K: usize = 5;

/// Relative weight of each prediction source.
///
/// The defaults favour the image classifier as the more
/// discriminative source. They are tunable constants, not
/// learned values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombineWeights {
    pub image:    f64,
    pub features: f64,
}

impl Default for CombineWeights {
    fn default() -> Self {
        Self { image: 0.7, features: 0.3 }
    }
}

impl CombineWeights {
    pub fn new(image: f64, features: f64) -> Result<Self> {
        if !image.is_finite() || !features.is_finite() || image < 0.0 || features < 0.0 {
            bail!("combination weights must be finite and non-negative (got image={image}, features={features})");
        }
        Ok(Self { image, features })
    }
}

/// Merge two ranked prediction lists into the final top-5.
///
/// Either list may be empty (that source simply contributes
/// nothing); both empty is an error.
pub fn merge_top_5(
    image_predictions:   &[Prediction],
    feature_predictions: &[Prediction],
    weights:             CombineWeights,
) -> Result<Vec<Prediction>> {
    if image_predictions.is_empty() && feature_predictions.is_empty() {
        bail!("nothing to rank: both the image and the feature classifier produced no predictions");
    }

    // Single-source degradation: pass the available ranking
    // through unchanged, no reweighting.
    if feature_predictions.is_empty() {
        return Ok(image_predictions.iter().take(TOP_K).cloned().collect());
    }
    if image_predictions.is_empty() {
        return Ok(feature_predictions.iter().take(TOP_K).cloned().collect());
    }

    // Weighted accumulation keyed by label, in first-seen order.
    let mut combined: Vec<Prediction> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for p in image_predictions {
        accumulate(&mut combined, &mut index, &p.label, p.score * weights.image);
    }
    for p in feature_predictions {
        accumulate(&mut combined, &mut index, &p.label, p.score * weights.features);
    }

    Ok(rank_top(combined, TOP_K))
}

fn accumulate(
    combined: &mut Vec<Prediction>,
    index:    &mut HashMap<String, usize>,
    label:    &str,
    weighted: f64,
) {
    match index.get(label) {
        Some(&i) => combined[i].score += weighted,
        None => {
            index.insert(label.to_string(), combined.len());
            combined.push(Prediction::new(label, weighted));
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn preds(pairs: &[(&str, f64)]) -> Vec<Prediction> {
        pairs.iter().map(|(l, s)| Prediction::new(*l, *s)).collect()
    }

    fn assert_score(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "score {actual} != expected {expected}"
        );
    }

    #[test]
    fn test_image_only_passthrough() {
        let image = preds(&[
            ("kot", 0.9), ("pies", 0.5), ("lis", 0.3),
            ("mysz", 0.2), ("kon", 0.1), ("krowa", 0.05),
        ]);
        let out = merge_top_5(&image, &[], CombineWeights::default()).unwrap();
        // Top 5 of the single source, scores untouched
        assert_eq!(out.len(), 5);
        assert_eq!(out[0], Prediction::new("kot", 0.9));
        assert_eq!(out[4], Prediction::new("kon", 0.1));
    }

    #[test]
    fn test_features_only_passthrough() {
        let features = preds(&[("lis", 0.4)]);
        let out = merge_top_5(&[], &features, CombineWeights::default()).unwrap();
        assert_eq!(out, preds(&[("lis", 0.4)]));
    }

    #[test]
    fn test_dual_source_weighted_sum() {
        let image    = preds(&[("kot", 0.9), ("pies", 0.5)]);
        let features = preds(&[("pies", 0.8), ("kot", 0.2)]);
        let out = merge_top_5(&image, &features, CombineWeights::default()).unwrap();

        assert_eq!(out.len(), 2);
        // kot  = 0.9*0.7 + 0.2*0.3 = 0.69
        // pies = 0.5*0.7 + 0.8*0.3 = 0.59
        assert_eq!(out[0].label, "kot");
        assert_score(out[0].score, 0.69);
        assert_eq!(out[1].label, "pies");
        assert_score(out[1].score, 0.59);
    }

    #[test]
    fn test_label_missing_from_one_source_contributes_zero() {
        let image    = preds(&[("kot", 0.6)]);
        let features = preds(&[("pies", 0.9)]);
        let out = merge_top_5(&image, &features, CombineWeights::default()).unwrap();

        // kot  = 0.6*0.7 = 0.42, pies = 0.9*0.3 = 0.27, no re-normalization
        assert_eq!(out[0].label, "kot");
        assert_score(out[0].score, 0.42);
        assert_eq!(out[1].label, "pies");
        assert_score(out[1].score, 0.27);
    }

    #[test]
    fn test_more_than_five_labels_are_truncated() {
        let image = preds(&[
            ("a", 0.9), ("b", 0.8), ("c", 0.7), ("d", 0.6),
        ]);
        let features = preds(&[
            ("e", 0.9), ("f", 0.8), ("g", 0.7),
        ]);
        let out = merge_top_5(&image, &features, CombineWeights::default()).unwrap();
        assert_eq!(out.len(), 5);
        // Weakest combined labels fall off the end
        assert!(out.iter().all(|p| p.label != "g"));
    }

    #[test]
    fn test_both_sources_empty_is_an_error() {
        let err = merge_top_5(&[], &[], CombineWeights::default()).unwrap_err();
        assert!(err.to_string().contains("no predictions"));
    }

    #[test]
    fn test_ties_keep_image_source_order() {
        // Both labels combine to the same score; the image-source
        // label was seen first and must stay first.
        let image    = preds(&[("kot", 0.3), ("pies", 0.3)]);
        let features = preds(&[("pies", 0.5), ("kot", 0.5)]);
        let out = merge_top_5(&image, &features, CombineWeights::default()).unwrap();
        assert_eq!(out[0].label, "kot");
        assert_eq!(out[1].label, "pies");
    }

    #[test]
    fn test_custom_weights() {
        let image    = preds(&[("kot", 0.5)]);
        let features = preds(&[("kot", 0.5)]);
        let w = CombineWeights::new(0.5, 0.5).unwrap();
        let out = merge_top_5(&image, &features, w).unwrap();
        assert_score(out[0].score, 0.5);
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        assert!(CombineWeights::new(-0.1, 0.3).is_err());
        assert!(CombineWeights::new(0.7, f64::NAN).is_err());
    }

    #[test]
    fn test_merge_is_idempotent() {
        let image    = preds(&[("kot", 0.9), ("pies", 0.5)]);
        let features = preds(&[("pies", 0.8), ("kot", 0.2)]);
        let a = merge_top_5(&image, &features, CombineWeights::default()).unwrap();
        let b = merge_top_5(&image, &features, CombineWeights::default()).unwrap();
        assert_eq!(a, b);
    }
}
