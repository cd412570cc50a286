// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with clap.
// Three commands:
//   1. `train-features` — trains the questionnaire classifier
//   2. `train-image`    — trains the photo classifier
//   3. `predict`        — ranks the best-matching animals
// All business logic is delegated to Layer 2 (application).

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PredictArgs, TrainFeaturesArgs, TrainImageArgs};

use crate::domain::combine::CombineWeights;
use crate::domain::features::FeatureVector;
use crate::domain::query::Query;

#[derive(Parser, Debug)]
#[command(
    name = "animal-quiz",
    version = "0.1.0",
    about = "Train animal classifiers on traits and photos, then guess which animal you resemble."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the right use
    /// case. This layer only routes and prints.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::TrainFeatures(args) => Self::run_train_features(args),
            Commands::TrainImage(args)    => Self::run_train_image(args),
            Commands::Predict(args)       => Self::run_predict(args),
        }
    }

    fn run_train_features(args: TrainFeaturesArgs) -> Result<()> {
        use crate::application::train_features_use_case::TrainFeaturesUseCase;

        tracing::info!("Training the feature classifier on: {}", args.data);

        let use_case = TrainFeaturesUseCase::new(args.into());
        use_case.execute()?;

        println!("Feature training complete. Artifacts saved.");
        Ok(())
    }

    fn run_train_image(args: TrainImageArgs) -> Result<()> {
        use crate::application::train_image_use_case::TrainImageUseCase;

        tracing::info!("Training the image classifier on: {}", args.data);

        let use_case = TrainImageUseCase::new(args.into());
        use_case.execute()?;

        println!("Image training complete. Artifacts saved.");
        Ok(())
    }

    fn run_predict(args: PredictArgs) -> Result<()> {
        use crate::application::predict_use_case::AnimalPredictor;
        use crate::infra::model_store::ModelStore;

        // Assemble the query from whichever inputs were given
        let features = if args.traits.is_empty() {
            None
        } else {
            Some(FeatureVector::from_pairs(args.traits.clone()))
        };
        let query = Query::from_options(args.image.clone(), features)?;

        let weights = CombineWeights::new(args.image_weight, args.feature_weight)?;

        let store     = ModelStore::new(&args.model_dir);
        let predictor = AnimalPredictor::from_store(&store)?.with_weights(weights);

        let ranking = predictor.predict_top_5(&query)?;

        println!("\nBest matches:");
        for (i, p) in ranking.iter().enumerate() {
            println!("  {}. {:<16} {:>5.1}%", i + 1, p.label, p.score * 100.0);
        }
        Ok(())
    }
}
