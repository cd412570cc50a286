// ============================================================
// Layer 3 — Prediction Domain Type
// ============================================================
// The unit of classifier output: an animal label with the
// probability the classifier assigned to it.

use serde::{Deserialize, Serialize};

/// One entry of a ranked classifier output.
///
/// Labels are lowercase ASCII identifiers shared by both
/// classifiers (e.g. "pies", "kot"). Scores are softmax
/// probabilities in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Animal class identifier
    pub label: String,

    /// Probability or combined confidence for this label
    pub score: f64,
}

impl Prediction {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self { label: label.into(), score }
    }
}

/// Sort predictions descending by score and keep the best `k`.
///
/// The sort is stable, so entries with equal scores keep their
/// original relative order.
pub fn rank_top(mut predictions: Vec<Prediction>, k: usize) -> Vec<Prediction> {
    predictions.sort_by(|a, b| b.score.total_cmp(&a.score));
    predictions.truncate(k);
    predictions
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_top_sorts_descending() {
        let preds = vec![
            Prediction::new("pies", 0.2),
            Prediction::new("kot", 0.7),
            Prediction::new("lis", 0.1),
        ];
        let ranked = rank_top(preds, 3);
        assert_eq!(ranked[0].label, "kot");
        assert_eq!(ranked[1].label, "pies");
        assert_eq!(ranked[2].label, "lis");
    }

    #[test]
    fn test_rank_top_truncates() {
        let preds = (0..8)
            .map(|i| Prediction::new(format!("a{i}"), i as f64 / 10.0))
            .collect();
        assert_eq!(rank_top(preds, 5).len(), 5);
    }

    #[test]
    fn test_rank_top_is_stable_on_ties() {
        let preds = vec![
            Prediction::new("kot", 0.5),
            Prediction::new("pies", 0.5),
        ];
        let ranked = rank_top(preds, 2);
        // Equal scores keep first-seen order
        assert_eq!(ranked[0].label, "kot");
        assert_eq!(ranked[1].label, "pies");
    }

    #[test]
    fn test_rank_top_shorter_than_k() {
        let preds = vec![Prediction::new("kot", 0.9)];
        assert_eq!(rank_top(preds, 5).len(), 1);
    }
}
