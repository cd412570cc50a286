// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers for one goal each: answering a
// query, or training one of the two classifiers. Workflow
// coordination only; no ML math, no printing, no direct tensor
// code.

// Combined prediction over one or both classifiers
pub mod predict_use_case;

// The feature-classifier training pipeline
pub mod train_features_use_case;

// The image-classifier training pipeline
pub mod train_image_use_case;
