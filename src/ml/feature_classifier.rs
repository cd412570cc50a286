// ============================================================
// Layer 5 — Feature Classifier (inference)
// ============================================================
// Answers "which animals match this questionnaire" from the
// persisted artifacts: validate the input map, drop unknown
// traits, impute missing ones with the training medians, scale,
// run the network, softmax, rank.

use anyhow::{anyhow, Result};
use burn::prelude::*;

use crate::data::imputer::MedianImputer;
use crate::domain::features::FeatureVector;
use crate::domain::prediction::{rank_top, Prediction};
use crate::domain::traits::RankedClassifier;
use crate::infra::model_store::{self, ModelStore};
use crate::ml::feature_model::{FeatureNet, FeatureNetConfig};
use crate::ml::TOP_N;

type InferBackend = burn::backend::Wgpu;

/// Trait values arrive in [0, 100]; the network was trained on [0, 1].
const TRAIT_SCALE: f64 = 100.0;

pub struct FeatureClassifier {
    model:       FeatureNet<InferBackend>,
    imputer:     MedianImputer,
    trait_names: Vec<String>,
    classes:     Vec<String>,
    device:      burn::backend::wgpu::WgpuDevice,
}

impl FeatureClassifier {
    /// Load the classifier if all its artifacts exist, `None` on
    /// a clean miss. Whether to train instead is the caller's
    /// decision.
    pub fn load_if_present(store: &ModelStore) -> Result<Option<Self>> {
        if !store.feature_artifacts_present() {
            return Ok(None);
        }
        Self::load(store).map(Some)
    }

    /// Load from the store, failing if anything is missing or
    /// does not match the saved architecture.
    pub fn load(store: &ModelStore) -> Result<Self> {
        let device = burn::backend::wgpu::WgpuDevice::default();

        let saved_cfg: FeatureNetConfig = store.load_json(model_store::FEATURE_CONFIG)?;
        let classes: Vec<String>        = store.load_json(model_store::FEATURE_CLASSES)?;
        let trait_names: Vec<String>    = store.load_json(model_store::FEATURE_NAMES)?;
        let imputer: MedianImputer      = store.load_json(model_store::IMPUTER)?;

        // Dropout plays no part at inference
        let cfg = FeatureNetConfig { dropout: 0.0, ..saved_cfg };
        let model: FeatureNet<InferBackend> = cfg.init(&device);
        let model = store.load_model(model, model_store::FEATURE_MODEL, &device)?;

        tracing::info!(
            "Feature classifier loaded: {} traits, {} classes",
            trait_names.len(),
            classes.len()
        );
        Ok(Self { model, imputer, trait_names, classes, device })
    }
}

impl RankedClassifier for FeatureClassifier {
    type Input = FeatureVector;

    fn predict_top_10(&self, input: &FeatureVector) -> Result<Vec<Prediction>> {
        input.validate()?;

        // Align to the trained trait order; keys the model does
        // not know are ignored, missing ones become None for the
        // imputer to fill.
        let aligned: Vec<Option<f64>> = self
            .trait_names
            .iter()
            .map(|name| input.get(name))
            .collect();

        let dense = self.imputer.transform(&aligned);
        let scaled: Vec<f32> = dense.iter().map(|v| (v / TRAIT_SCALE) as f32).collect();

        let inputs = Tensor::<InferBackend, 1>::from_floats(scaled.as_slice(), &self.device)
            .reshape([1, self.trait_names.len()]);

        let logits = self.model.forward(inputs);
        let probs: Vec<f32> = burn::tensor::activation::softmax(logits, 1)
            .flatten::<1>(0, 1)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow!("cannot read class probabilities: {e:?}"))?;

        let predictions: Vec<Prediction> = self
            .classes
            .iter()
            .zip(&probs)
            .map(|(label, p)| Prediction::new(label, f64::from(*p)))
            .collect();

        let ranked = rank_top(predictions, TOP_N);
        tracing::debug!("Feature top-{}: {:?}", ranked.len(), ranked);
        Ok(ranked)
    }
}
