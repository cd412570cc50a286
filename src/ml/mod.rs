// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn framework code lives in this layer (plus the
// batchers in data/). Other layers see only domain types and
// anyhow Results.
//
//   feature_model.rs      — feed-forward network over the trait
//                           vector: two hidden layers, ReLU,
//                           dropout, cross-entropy head
//
//   image_model.rs        — small convolutional network: three
//                           conv/pool blocks and a linear head
//
//   feature_trainer.rs    — training loop for the feature
//                           network, plus the grid sweep over
//                           learning rate and hidden width
//
//   image_trainer.rs      — training loop for the image network
//
//   feature_classifier.rs — inference: validate, impute, rank
//                           all classes for a questionnaire
//
//   image_classifier.rs   — inference: preprocess a photo and
//                           rank all classes

/// How many entries a classifier ranking may contain.
pub const TOP_N: usize = 10;

/// Feed-forward network over trait vectors
pub mod feature_model;

/// Convolutional network over photos
pub mod image_model;

/// Feature network training loop and hyperparameter sweep
pub mod feature_trainer;

/// Image network training loop
pub mod image_trainer;

/// Trait-questionnaire inference
pub mod feature_classifier;

/// Photo inference
pub mod image_classifier;
