// ============================================================
// Layer 6 — Model Store
// ============================================================
// Saves and restores trained artifacts under one directory:
//
//   models/
//     feature_model.mpk.gz    ← feature network weights
//     feature_config.json     ← feature architecture + hyperparameters
//     feature_classes.json    ← ordered label list (feature classifier)
//     feature_names.json      ← ordered trait vocabulary
//     imputer.json            ← per-trait medians
//     image_model.mpk.gz      ← image network weights
//     image_config.json       ← image architecture + hyperparameters
//     image_classes.json      ← ordered label list (image classifier)
//
// Weights go through Burn's CompactRecorder (MessagePack +
// gzip); loading fails if the architecture does not match.
// Everything else is plain JSON via serde.
//
// The store never trains anything: presence checks and loads
// are separate operations, and a missing artifact is a normal
// `false` / error for the caller to act on.

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::{fs, path::{Path, PathBuf}};
use burn::{
    module::Module,
    prelude::*,
    record::{CompactRecorder, Recorder},
};

// Weight record base names. CompactRecorder appends ".mpk.gz".
pub const FEATURE_MODEL: &str = "feature_model";
pub const IMAGE_MODEL:   &str = "image_model";

// JSON sidecar file names.
pub const FEATURE_CONFIG:  &str = "feature_config.json";
pub const FEATURE_CLASSES: &str = "feature_classes.json";
pub const FEATURE_NAMES:   &str = "feature_names.json";
pub const IMPUTER:         &str = "imputer.json";
pub const IMAGE_CONFIG:    &str = "image_config.json";
pub const IMAGE_CLASSES:   &str = "image_classes.json";

/// All trained artifacts for both classifiers live here.
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    /// Open a store at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    // ── Weight records ────────────────────────────────────────────────────────

    /// Serialise a model's parameters under `name`.
    pub fn save_model<B, M>(&self, model: M, name: &str) -> Result<()>
    where
        B: Backend,
        M: Module<B>,
    {
        let path = self.dir.join(name);
        CompactRecorder::new()
            .record(model.into_record(), path.clone())
            .with_context(|| format!("failed to save model weights to '{}'", path.display()))?;
        tracing::debug!("Saved weights: {}", path.display());
        Ok(())
    }

    /// Restore parameters into `model`, which must already have
    /// the architecture the weights were saved with.
    pub fn load_model<B, M>(&self, model: M, name: &str, device: &B::Device) -> Result<M>
    where
        B: Backend,
        M: Module<B>,
    {
        let path = self.dir.join(name);
        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!(
                    "cannot load model weights from '{}'. Has this classifier been trained?",
                    path.display()
                )
            })?;
        Ok(model.load_record(record))
    }

    // ── JSON sidecars ─────────────────────────────────────────────────────────

    pub fn save_json<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.dir.join(name);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json)
            .with_context(|| format!("cannot write '{}'", path.display()))?;
        tracing::debug!("Saved artifact: {}", path.display());
        Ok(())
    }

    pub fn load_json<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.dir.join(name);
        let json = fs::read_to_string(&path)
            .with_context(|| format!("cannot read '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("'{}' is not valid JSON for its type", path.display()))
    }

    // ── Presence checks (the "load if present" half) ──────────────────────────

    /// All artifacts the feature classifier needs to come back up.
    pub fn feature_artifacts_present(&self) -> bool {
        self.record_exists(FEATURE_MODEL)
            && [FEATURE_CONFIG, FEATURE_CLASSES, FEATURE_NAMES, IMPUTER]
                .iter()
                .all(|name| self.dir.join(name).exists())
    }

    /// All artifacts the image classifier needs to come back up.
    pub fn image_artifacts_present(&self) -> bool {
        self.record_exists(IMAGE_MODEL)
            && [IMAGE_CONFIG, IMAGE_CLASSES]
                .iter()
                .all(|name| self.dir.join(name).exists())
    }

    fn record_exists(&self, name: &str) -> bool {
        self.dir.join(format!("{name}.mpk.gz")).exists()
    }
}
