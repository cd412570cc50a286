// ============================================================
// Layer 2 — Train Image Use Case
// ============================================================
// The image-classifier pipeline:
//
//   Step 1: Scan and decode the photo directories  (Layer 4)
//   Step 2: Split train/validation                 (Layer 4)
//   Step 3: Train the convolutional network        (Layer 5)
//   Step 4: Persist every artifact                 (Layer 6)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::data::image_dataset::{ImageFolderLoader, IMAGE_SIZE};
use crate::data::splitter::split_train_val;
use crate::infra::metrics::MetricsLogger;
use crate::infra::model_store::{self, ModelStore};
use crate::ml::image_model::ImageCnnConfig;
use crate::ml::image_trainer::run_image_training;

// ─── Training Configuration ──────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageTrainConfig {
    pub data_dir:       String,
    pub model_dir:      String,
    pub epochs:         usize,
    pub batch_size:     usize,
    pub lr:             f64,
    pub dropout:        f64,
    pub train_fraction: f64,
    pub seed:           u64,
}

impl Default for ImageTrainConfig {
    fn default() -> Self {
        Self {
            data_dir:       "data/photos".to_string(),
            model_dir:      "models".to_string(),
            epochs:         10,
            batch_size:     32,
            lr:             1e-3,
            dropout:        0.5,
            train_fraction: 0.8,
            seed:           42,
        }
    }
}

// ─── TrainImageUseCase ────────────────────────────────────────────────────────
pub struct TrainImageUseCase {
    config: ImageTrainConfig,
}

impl TrainImageUseCase {
    pub fn new(config: ImageTrainConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Load ──────────────────────────────────────────────────────
        let (classes, samples) = ImageFolderLoader::new(&cfg.data_dir).load()?;
        if classes.len() < 2 {
            bail!(
                "need at least two label directories to train, found {}",
                classes.len()
            );
        }

        // ── Step 2: Split ─────────────────────────────────────────────────────
        let (train, val) = split_train_val(samples, cfg.train_fraction, cfg.seed);
        if train.is_empty() {
            bail!("the training split is empty: add photos or raise --train-fraction");
        }

        // ── Step 3: Train ─────────────────────────────────────────────────────
        let metrics = MetricsLogger::new(&cfg.model_dir, "image_metrics.csv")?;

        let net_cfg = ImageCnnConfig::new(classes.len())
            .with_image_size(IMAGE_SIZE as usize)
            .with_dropout(cfg.dropout);
        let trained = run_image_training(cfg, net_cfg, train, val, &metrics)?;

        // ── Step 4: Persist ───────────────────────────────────────────────────
        let store = ModelStore::new(&cfg.model_dir);
        store.save_model(trained.model, model_store::IMAGE_MODEL)?;
        store.save_json(model_store::IMAGE_CONFIG, &trained.net_cfg)?;
        store.save_json(model_store::IMAGE_CLASSES, &classes)?;

        tracing::info!(
            "Image classifier trained (val_acc={:.3}), artifacts in '{}'",
            trained.val_acc,
            cfg.model_dir,
        );
        Ok(())
    }
}
