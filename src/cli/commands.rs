// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// The three subcommands and their flags. clap's derive macros
// generate the parsing, help text, and type conversions.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::train_features_use_case::FeatureTrainConfig;
use crate::application::train_image_use_case::ImageTrainConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the questionnaire classifier on a trait CSV
    TrainFeatures(TrainFeaturesArgs),

    /// Train the photo classifier on a directory-per-label dataset
    TrainImage(TrainImageArgs),

    /// Rank the best-matching animals for a photo, trait scores, or both
    Predict(PredictArgs),
}

/// All arguments for the `train-features` command.
#[derive(Args, Debug)]
pub struct TrainFeaturesArgs {
    /// CSV file with one labelled row per animal example
    #[arg(long, default_value = "data/traits.csv")]
    pub data: String,

    /// Directory for trained artifacts
    #[arg(long, default_value = "models")]
    pub model_dir: String,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 30)]
    pub epochs: usize,

    /// Samples per forward pass
    #[arg(long, default_value_t = 16)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// First hidden layer width (the second is half of it)
    #[arg(long, default_value_t = 64)]
    pub hidden: usize,

    /// Dropout probability between hidden layers
    #[arg(long, default_value_t = 0.3)]
    pub dropout: f64,

    /// Fraction of rows kept for training, the rest validate
    #[arg(long, default_value_t = 0.8)]
    pub train_fraction: f64,

    /// Seed for the shuffle before splitting
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Grid-search learning rate and hidden width instead of
    /// using --lr / --hidden directly
    #[arg(long, default_value_t = false)]
    pub tune: bool,
}

impl From<TrainFeaturesArgs> for FeatureTrainConfig {
    fn from(a: TrainFeaturesArgs) -> Self {
        FeatureTrainConfig {
            data_path:      a.data,
            model_dir:      a.model_dir,
            epochs:         a.epochs,
            batch_size:     a.batch_size,
            lr:             a.lr,
            hidden:         a.hidden,
            dropout:        a.dropout,
            train_fraction: a.train_fraction,
            seed:           a.seed,
            tune:           a.tune,
        }
    }
}

/// All arguments for the `train-image` command.
#[derive(Args, Debug)]
pub struct TrainImageArgs {
    /// Dataset root with one subdirectory of photos per label
    #[arg(long, default_value = "data/photos")]
    pub data: String,

    /// Directory for trained artifacts
    #[arg(long, default_value = "models")]
    pub model_dir: String,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 10)]
    pub epochs: usize,

    /// Samples per forward pass
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Dropout probability in the classifier head
    #[arg(long, default_value_t = 0.5)]
    pub dropout: f64,

    /// Fraction of photos kept for training, the rest validate
    #[arg(long, default_value_t = 0.8)]
    pub train_fraction: f64,

    /// Seed for the shuffle before splitting
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

impl From<TrainImageArgs> for ImageTrainConfig {
    fn from(a: TrainImageArgs) -> Self {
        ImageTrainConfig {
            data_dir:       a.data,
            model_dir:      a.model_dir,
            epochs:         a.epochs,
            batch_size:     a.batch_size,
            lr:             a.lr,
            dropout:        a.dropout,
            train_fraction: a.train_fraction,
            seed:           a.seed,
        }
    }
}

/// All arguments for the `predict` command.
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Photo to classify
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Trait score as name=value, 0 to 100; repeatable,
    /// e.g. --trait lojalnosc=60 --trait lenistwo=30
    #[arg(long = "trait", value_parser = parse_trait)]
    pub traits: Vec<(String, f64)>,

    /// Directory holding the trained artifacts
    #[arg(long, default_value = "models")]
    pub model_dir: String,

    /// Weight of the image classifier in a dual-source query
    #[arg(long, default_value_t = 0.7)]
    pub image_weight: f64,

    /// Weight of the feature classifier in a dual-source query
    #[arg(long, default_value_t = 0.3)]
    pub feature_weight: f64,
}

/// Parse one `name=value` trait flag.
fn parse_trait(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("'{s}' is not in name=value form"))?;
    if name.is_empty() {
        return Err(format!("'{s}' has an empty trait name"));
    }
    let value: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number (in '{s}')"))?;
    Ok((name.to_string(), value))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trait_ok() {
        assert_eq!(
            parse_trait("lojalnosc=60").unwrap(),
            ("lojalnosc".to_string(), 60.0)
        );
    }

    #[test]
    fn test_parse_trait_rejects_missing_equals() {
        assert!(parse_trait("lojalnosc").is_err());
    }

    #[test]
    fn test_parse_trait_rejects_bad_number() {
        assert!(parse_trait("lojalnosc=duzo").is_err());
    }

    #[test]
    fn test_parse_trait_rejects_empty_name() {
        assert!(parse_trait("=5").is_err());
    }
}
