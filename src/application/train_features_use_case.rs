// ============================================================
// Layer 2 — Train Features Use Case
// ============================================================
// The full feature-classifier pipeline in order:
//
//   Step 1: Load the trait CSV          (Layer 4 - data)
//   Step 2: Fit the median imputer      (Layer 4 - data)
//   Step 3: Impute + scale the rows     (Layer 4 - data)
//   Step 4: Split train/validation      (Layer 4 - data)
//   Step 5: Train, or sweep and train   (Layer 5 - ml)
//   Step 6: Persist every artifact      (Layer 6 - infra)
//
// Training only ever runs through this use case. Prediction
// never falls back to it on a missing model.

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::data::feature_dataset::{CsvFeatureLoader, FeatureSample};
use crate::data::imputer::MedianImputer;
use crate::data::splitter::split_train_val;
use crate::infra::metrics::MetricsLogger;
use crate::infra::model_store::{self, ModelStore};
use crate::ml::feature_model::FeatureNetConfig;
use crate::ml::feature_trainer::{run_feature_training, tune_feature_net};

/// Trait values arrive in [0, 100]; the network trains on [0, 1].
const TRAIT_SCALE: f64 = 100.0;

// ─── Training Configuration ──────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureTrainConfig {
    pub data_path:      String,
    pub model_dir:      String,
    pub epochs:         usize,
    pub batch_size:     usize,
    pub lr:             f64,
    pub hidden:         usize,
    pub dropout:        f64,
    pub train_fraction: f64,
    pub seed:           u64,
    pub tune:           bool,
}

impl Default for FeatureTrainConfig {
    fn default() -> Self {
        Self {
            data_path:      "data/traits.csv".to_string(),
            model_dir:      "models".to_string(),
            epochs:         30,
            batch_size:     16,
            lr:             1e-3,
            hidden:         64,
            dropout:        0.3,
            train_fraction: 0.8,
            seed:           42,
            tune:           false,
        }
    }
}

// ─── TrainFeaturesUseCase ─────────────────────────────────────────────────────
pub struct TrainFeaturesUseCase {
    config: FeatureTrainConfig,
}

impl TrainFeaturesUseCase {
    pub fn new(config: FeatureTrainConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Load ──────────────────────────────────────────────────────
        let table = CsvFeatureLoader::new(&cfg.data_path).load()?;
        if table.records.is_empty() {
            bail!("the trait dataset '{}' has no rows", cfg.data_path);
        }

        let classes = table.class_list();
        if classes.len() < 2 {
            bail!(
                "need at least two animal classes to train, found {}",
                classes.len()
            );
        }

        // ── Step 2: Fit the imputer on the raw columns ────────────────────────
        let imputer = MedianImputer::fit(&table)?;

        // ── Step 3: Dense, scaled samples ─────────────────────────────────────
        let class_index: HashMap<&str, usize> = classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();

        let mut samples = Vec::with_capacity(table.records.len());
        for record in &table.records {
            let label_idx = *class_index
                .get(record.label.as_str())
                .ok_or_else(|| anyhow!("label '{}' missing from the class index", record.label))?;

            let dense = imputer.transform(&record.values);
            samples.push(FeatureSample {
                features: dense.iter().map(|v| (v / TRAIT_SCALE) as f32).collect(),
                label_idx,
            });
        }

        // ── Step 4: Split ─────────────────────────────────────────────────────
        let (train, val) = split_train_val(samples, cfg.train_fraction, cfg.seed);
        if train.is_empty() {
            bail!("the training split is empty: add rows or raise --train-fraction");
        }

        // ── Step 5: Train (sweeping if asked) ─────────────────────────────────
        let metrics = MetricsLogger::new(&cfg.model_dir, "feature_metrics.csv")?;

        let trained = if cfg.tune {
            tune_feature_net(cfg, table.trait_names.len(), classes.len(), &train, &val, &metrics)?
        } else {
            let net_cfg = FeatureNetConfig::new(table.trait_names.len(), classes.len())
                .with_hidden(cfg.hidden)
                .with_dropout(cfg.dropout);
            run_feature_training(cfg, net_cfg, train, val, &metrics)?
        };

        // ── Step 6: Persist ───────────────────────────────────────────────────
        let store = ModelStore::new(&cfg.model_dir);
        store.save_model(trained.model, model_store::FEATURE_MODEL)?;
        store.save_json(model_store::FEATURE_CONFIG, &trained.net_cfg)?;
        store.save_json(model_store::FEATURE_CLASSES, &classes)?;
        store.save_json(model_store::FEATURE_NAMES, &table.trait_names)?;
        store.save_json(model_store::IMPUTER, &imputer)?;

        tracing::info!(
            "Feature classifier trained (val_acc={:.3}), artifacts in '{}'",
            trained.val_acc,
            cfg.model_dir,
        );
        Ok(())
    }
}
