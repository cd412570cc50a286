// ============================================================
// Layer 5 — Image Classifier (inference)
// ============================================================
// Answers "which animals match this photo" from the persisted
// artifacts: decode and preprocess exactly as during training,
// run the network, softmax, rank.

use anyhow::{anyhow, Result};
use burn::prelude::*;
use std::path::Path;

use crate::data::image_dataset::{load_and_preprocess, CHANNELS, IMAGE_SIZE};
use crate::domain::prediction::{rank_top, Prediction};
use crate::domain::traits::RankedClassifier;
use crate::infra::model_store::{self, ModelStore};
use crate::ml::image_model::{ImageCnn, ImageCnnConfig};
use crate::ml::TOP_N;

type InferBackend = burn::backend::Wgpu;

pub struct ImageClassifier {
    model:   ImageCnn<InferBackend>,
    classes: Vec<String>,
    device:  burn::backend::wgpu::WgpuDevice,
}

impl ImageClassifier {
    /// Load the classifier if all its artifacts exist, `None` on
    /// a clean miss.
    pub fn load_if_present(store: &ModelStore) -> Result<Option<Self>> {
        if !store.image_artifacts_present() {
            return Ok(None);
        }
        Self::load(store).map(Some)
    }

    pub fn load(store: &ModelStore) -> Result<Self> {
        let device = burn::backend::wgpu::WgpuDevice::default();

        let saved_cfg: ImageCnnConfig = store.load_json(model_store::IMAGE_CONFIG)?;
        let classes: Vec<String>      = store.load_json(model_store::IMAGE_CLASSES)?;

        let cfg = ImageCnnConfig { dropout: 0.0, ..saved_cfg };
        let model: ImageCnn<InferBackend> = cfg.init(&device);
        let model = store.load_model(model, model_store::IMAGE_MODEL, &device)?;

        tracing::info!("Image classifier loaded: {} classes", classes.len());
        Ok(Self { model, classes, device })
    }
}

impl RankedClassifier for ImageClassifier {
    type Input = Path;

    fn predict_top_10(&self, input: &Path) -> Result<Vec<Prediction>> {
        let pixels = load_and_preprocess(input)?;
        let side   = IMAGE_SIZE as usize;

        let inputs = Tensor::<InferBackend, 1>::from_floats(pixels.as_slice(), &self.device)
            .reshape([1, CHANNELS, side, side]);

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
        tracing::debug!("Image top-{}: {:?}", ranked.len(), ranked);
        Ok(ranked)
    }
}
