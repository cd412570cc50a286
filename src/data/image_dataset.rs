// ============================================================
// Layer 4 — Image Dataset
// ============================================================
// Loads a directory-per-label photo dataset:
//
//   photos/
//     kot/   a.jpg b.jpg ...
//     pies/  c.png ...
//
// Every decodable file under a label directory becomes one
// sample. Files that fail to decode are skipped with a warning
// so one corrupt photo does not abort a training run.
//
// Photos are resized to 224x224 and pixel values scaled to
// [0, 1]. The exact same preprocessing runs at inference time.

use anyhow::{bail, Context, Result};
use image::imageops::FilterType;
use std::path::{Path, PathBuf};

use burn::data::dataset::Dataset;

/// Side length photos are resized to before entering the network.
pub const IMAGE_SIZE: u32 = 224;

/// Number of colour channels fed to the network.
pub const CHANNELS: usize = 3;

/// One decoded training photo. `pixels` is CHW-ordered,
/// `CHANNELS * IMAGE_SIZE * IMAGE_SIZE` values in [0, 1].
#[derive(Debug, Clone)]
pub struct ImageSample {
    pub pixels:    Vec<f32>,
    pub label_idx: usize,
}

/// Loads all photos under a dataset root directory.
pub struct ImageFolderLoader {
    root: PathBuf,
}

impl ImageFolderLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Scan the label directories and decode every photo.
    /// Returns the sorted class list and the samples.
    pub fn load(&self) -> Result<(Vec<String>, Vec<ImageSample>)> {
        if !self.root.is_dir() {
            bail!("image dataset root '{}' is not a directory", self.root.display());
        }

        // Sorted subdirectory names define the class order
        let mut class_dirs: Vec<(String, PathBuf)> = Vec::new();
        for entry in std::fs::read_dir(&self.root)
            .with_context(|| format!("cannot read '{}'", self.root.display()))?
        {
            let entry = entry?;
            let path  = entry.path();
            if path.is_dir() {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    class_dirs.push((name.to_lowercase(), path.clone()));
                }
            }
        }
        class_dirs.sort_by(|a, b| a.0.cmp(&b.0));

        if class_dirs.is_empty() {
            bail!(
                "image dataset root '{}' has no label subdirectories",
                self.root.display()
            );
        }

        let classes: Vec<String> = class_dirs.iter().map(|(name, _)| name.clone()).collect();
        let mut samples = Vec::new();

        for (label_idx, (label, dir)) in class_dirs.iter().enumerate() {
            let mut kept = 0usize;
            for entry in std::fs::read_dir(dir)
                .with_context(|| format!("cannot read '{}'", dir.display()))?
            {
                let path = entry?.path();
                if !path.is_file() {
                    continue;
                }
                match load_and_preprocess(&path) {
                    Ok(pixels) => {
                        samples.push(ImageSample { pixels, label_idx });
                        kept += 1;
                    }
                    Err(e) => {
                        tracing::warn!("Skipping '{}': {e}", path.display());
                    }
                }
            }
            tracing::debug!("Label '{label}': {kept} photos");
        }

        if samples.is_empty() {
            bail!(
                "no decodable photos found under '{}'",
                self.root.display()
            );
        }

        tracing::info!(
            "Loaded {} photos across {} labels from '{}'",
            samples.len(),
            classes.len(),
            self.root.display()
        );
        Ok((classes, samples))
    }
}

/// Decode one photo and turn it into network input: resize to
/// IMAGE_SIZE x IMAGE_SIZE, RGB, CHW order, scaled by 1/255.
/// Shared between training and inference.
pub fn load_and_preprocess(path: &Path) -> Result<Vec<f32>> {
    let img = image::open(path)
        .with_context(|| format!("cannot decode image '{}'", path.display()))?;

    let rgb = img
        .resize_exact(IMAGE_SIZE, IMAGE_SIZE, FilterType::CatmullRom)
        .to_rgb8();

    let side = IMAGE_SIZE as usize;
    let mut pixels = vec![0.0f32; CHANNELS * side * side];

    for (x, y, p) in rgb.enumerate_pixels() {
        let (x, y) = (x as usize, y as usize);
        for c in 0..CHANNELS {
            pixels[c * side * side + y * side + x] = f32::from(p.0[c]) / 255.0;
        }
    }

    Ok(pixels)
}

pub struct ImageDataset {
    samples: Vec<ImageSample>,
}

impl ImageDataset {
    pub fn new(samples: Vec<ImageSample>) -> Self {
        Self { samples }
    }
}

impl Dataset<ImageSample> for ImageDataset {
    fn get(&self, index: usize) -> Option<ImageSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
