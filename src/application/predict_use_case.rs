// ============================================================
// Layer 2 — Predict Use Case
// ============================================================
// The combined predictor: holds whichever classifiers are
// trained, runs the ones the query names, and merges their
// rankings into the final top-5.
//
// Loading happens once, here, when the predictor is built. A
// load failure is fatal for the whole predictor; a missing
// model only becomes an error when a query actually needs it.

use anyhow::{anyhow, bail, Result};
use std::path::Path;

use crate::domain::combine::{merge_top_5, CombineWeights};
use crate::domain::features::FeatureVector;
use crate::domain::prediction::Prediction;
use crate::domain::query::Query;
use crate::domain::traits::RankedClassifier;
use crate::infra::model_store::ModelStore;
use crate::ml::feature_classifier::FeatureClassifier;
use crate::ml::image_classifier::ImageClassifier;

pub struct AnimalPredictor {
    feature_classifier: Option<FeatureClassifier>,
    image_classifier:   Option<ImageClassifier>,
    weights:            CombineWeights,
}

impl std::fmt::Debug for AnimalPredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimalPredictor")
            .field("feature_classifier", &self.feature_classifier.is_some())
            .field("image_classifier", &self.image_classifier.is_some())
            .field("weights", &self.weights)
            .finish()
    }
}

impl AnimalPredictor {
    /// Load every classifier whose artifacts exist in the store.
    /// Fails when nothing is trained at all, or when artifacts
    /// exist but cannot be loaded.
    pub fn from_store(store: &ModelStore) -> Result<Self> {
        let feature_classifier = FeatureClassifier::load_if_present(store)?;
        let image_classifier   = ImageClassifier::load_if_present(store)?;

        if feature_classifier.is_none() && image_classifier.is_none() {
            bail!(
                "no trained models in '{}': run `train-features` and/or `train-image` first",
                store.dir().display()
            );
        }

        Ok(Self {
            feature_classifier,
            image_classifier,
            weights: CombineWeights::default(),
        })
    }

    pub fn with_weights(mut self, weights: CombineWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Rank the best-matching animals for one query.
    pub fn predict_top_5(&self, query: &Query) -> Result<Vec<Prediction>> {
        let (image_predictions, feature_predictions) = match query {
            Query::Image(path) => (self.rank_image(path)?, Vec::new()),
            Query::Features(fv) => (Vec::new(), self.rank_features(fv)?),
            Query::Both(path, fv) => (self.rank_image(path)?, self.rank_features(fv)?),
        };

        let ranked = merge_top_5(&image_predictions, &feature_predictions, self.weights)?;
        tracing::info!("Top {} combined predictions: {:?}", ranked.len(), ranked);
        Ok(ranked)
    }

    fn rank_image(&self, path: &Path) -> Result<Vec<Prediction>> {
        self.image_classifier
            .as_ref()
            .ok_or_else(|| {
                anyhow!("the image classifier is not trained: run `train-image` or drop the photo input")
            })?
            .predict_top_10(path)
    }

    fn rank_features(&self, fv: &FeatureVector) -> Result<Vec<Prediction>> {
        self.feature_classifier
            .as_ref()
            .ok_or_else(|| {
                anyhow!("the feature classifier is not trained: run `train-features` or drop the trait input")
            })?
            .predict_top_10(fv)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_store_fails_without_any_trained_model() {
        let dir = std::env::temp_dir().join(format!(
            "animal-quiz-empty-store-{}",
            std::process::id()
        ));
        let store = ModelStore::new(&dir);
        let err = AnimalPredictor::from_store(&store).unwrap_err();
        assert!(err.to_string().contains("no trained models"));
        std::fs::remove_dir_all(&dir).ok();
    }
}
