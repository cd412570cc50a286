// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust types for the quiz engine. Rules for this layer:
//   - NO Burn framework types
//   - NO file I/O or network calls
//   - Only plain structs, enums, traits and the combination math

// A single (label, score) classifier output
pub mod prediction;

// The user-supplied trait questionnaire
pub mod features;

// Tagged prediction request: image, features, or both
pub mod query;

// Weighted merging of two classifier rankings
pub mod combine;

// Core abstractions implemented by the ml layer
pub mod traits;
