// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between raw dataset files and GPU-ready batches.
//
// The feature pipeline:
//
//   traits.csv
//       │
//       ▼
//   CsvFeatureLoader   → label + raw trait columns (missing cells kept)
//       │
//       ▼
//   MedianImputer      → fills missing cells with per-trait medians
//       │
//       ▼
//   FeatureDataset     → dense, scaled samples for Burn's DataLoader
//       │
//       ▼
//   FeatureBatcher     → stacks samples into [batch, traits] tensors
//
// The image pipeline:
//
//   photos/<label>/*.jpg
//       │
//       ▼
//   ImageFolderLoader  → decode, resize, normalise, tag with label
//       │
//       ▼
//   ImageDataset       → samples for Burn's DataLoader
//       │
//       ▼
//   ImageBatcher       → stacks samples into [batch, 3, H, W] tensors
//
// split_train_val sits between loading and training in both.

/// Loads the labelled trait table from a CSV file
pub mod feature_dataset;

/// Loads a directory-per-label photo dataset
pub mod image_dataset;

/// Per-trait median imputation of missing values
pub mod imputer;

/// Seeded shuffle and train/validation split
pub mod splitter;

/// Stacks feature samples into tensors
pub mod feature_batcher;

/// Stacks image samples into tensors
pub mod image_batcher;
