// ============================================================
// Layer 5 — Feature Network Training
// ============================================================
// Train + validation loop for the tabular classifier, and the
// grid sweep over learning rate and hidden width that replaces
// hand-picking those two numbers.
//
// Training uses Autodiff<Wgpu>; validation runs on the inner
// backend via model.valid() so dropout is disabled and no
// gradient state is kept.

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_features_use_case::FeatureTrainConfig;
use crate::data::feature_batcher::FeatureBatcher;
use crate::data::feature_dataset::{FeatureDataset, FeatureSample};
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::feature_model::{FeatureNet, FeatureNetConfig};

type MyBackend      = burn::backend::Autodiff<burn::backend::Wgpu>;
type MyInnerBackend = burn::backend::Wgpu;

/// Learning rates tried by the sweep.
const LR_GRID: [f64; 2] = [1e-2, 1e-3];

/// Hidden widths tried by the sweep.
const HIDDEN_GRID: [usize; 3] = [32, 64, 128];

/// A trained feature network plus the numbers needed to pick
/// between sweep candidates and to persist the winner.
pub struct TrainedFeatureNet {
    pub model:   FeatureNet<MyBackend>,
    pub net_cfg: FeatureNetConfig,
    pub val_acc: f64,
}

/// Train one feature network with the given architecture.
pub fn run_feature_training(
    cfg:           &FeatureTrainConfig,
    net_cfg:       FeatureNetConfig,
    train_samples: Vec<FeatureSample>,
    val_samples:   Vec<FeatureSample>,
    metrics:       &MetricsLogger,
) -> Result<TrainedFeatureNet> {
    let device = burn::backend::wgpu::WgpuDevice::default();

    let mut model: FeatureNet<MyBackend> = net_cfg.init(&device);
    tracing::info!(
        "Feature net ready: {} traits, {} classes, hidden={}",
        net_cfg.num_traits, net_cfg.num_classes, net_cfg.hidden,
    );

    let optim_cfg = AdamConfig::new().with_epsilon(1e-8);
    let mut optim = optim_cfg.init();

    let train_batcher = FeatureBatcher::<MyBackend>::new(device.clone());
    let train_loader  = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(FeatureDataset::new(train_samples));

    let val_batcher = FeatureBatcher::<MyInnerBackend>::new(device.clone());
    let val_loader  = DataLoaderBuilder::new(val_batcher)
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(FeatureDataset::new(val_samples));

    let mut val_acc = 0.0f64;

    for epoch in 1..=cfg.epochs {
        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum = 0.0f64;
        let mut train_batches  = 0usize;

        for batch in train_loader.iter() {
            let (loss, _) = model.forward_loss(batch.inputs, batch.targets);

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            train_loss_sum += loss_val;
            train_batches  += 1;

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let avg_train_loss = if train_batches > 0 {
            train_loss_sum / train_batches as f64
        } else { f64::NAN };

        // ── Validation phase ──────────────────────────────────────────────────
        let model_valid = model.valid();

        let mut val_loss_sum  = 0.0f64;
        let mut val_batches   = 0usize;
        let mut correct       = 0usize;
        let mut total_samples = 0usize;

        for batch in val_loader.iter() {
            let logits = model_valid.forward(batch.inputs);

            let ce = burn::nn::loss::CrossEntropyLossConfig::new()
                .init(&logits.device());
            let batch_loss: f64 = ce
                .forward(logits.clone(), batch.targets.clone())
                .into_scalar().elem::<f64>();
            val_loss_sum += batch_loss;
            val_batches  += 1;

            // argmax(1) returns [batch, 1] — flatten to [batch]
            // before comparing against the target indices
            let predicted = logits.argmax(1).flatten::<1>(0, 1);
            total_samples += batch.targets.dims()[0];

            let batch_correct: i64 = predicted
                .equal(batch.targets)
                .int().sum().into_scalar().elem::<i64>();
            correct += batch_correct as usize;
        }

        let avg_val_loss = if val_batches > 0 { val_loss_sum / val_batches as f64 } else { f64::NAN };
        val_acc = if total_samples > 0 { correct as f64 / total_samples as f64 } else { 0.0 };

        println!(
            "Epoch {:>3}/{} | train_loss={:.4} | val_loss={:.4} | val_acc={:.1}%",
            epoch, cfg.epochs, avg_train_loss, avg_val_loss, val_acc * 100.0,
        );

        metrics.log(&EpochMetrics::new(epoch, avg_train_loss, avg_val_loss, val_acc))?;
    }

    Ok(TrainedFeatureNet { model, net_cfg, val_acc })
}

/// Grid-search learning rate and hidden width, keeping the
/// candidate with the best validation accuracy. All candidates
/// train on the same split, so the comparison is fair.
pub fn tune_feature_net(
    cfg:           &FeatureTrainConfig,
    num_traits:    usize,
    num_classes:   usize,
    train_samples: &[FeatureSample],
    val_samples:   &[FeatureSample],
    metrics:       &MetricsLogger,
) -> Result<TrainedFeatureNet> {
    let mut best: Option<TrainedFeatureNet> = None;
    let mut best_lr = cfg.lr;

    for lr in LR_GRID {
        for hidden in HIDDEN_GRID {
            tracing::info!("Sweep candidate: lr={lr}, hidden={hidden}");

            let mut candidate_cfg = cfg.clone();
            candidate_cfg.lr = lr;

            let net_cfg = FeatureNetConfig::new(num_traits, num_classes)
                .with_hidden(hidden)
                .with_dropout(cfg.dropout);

            let trained = run_feature_training(
                &candidate_cfg,
                net_cfg,
                train_samples.to_vec(),
                val_samples.to_vec(),
                metrics,
            )?;

            tracing::info!(
                "Candidate lr={lr}, hidden={hidden}: val_acc={:.3}",
                trained.val_acc
            );

            let better = best
                .as_ref()
                .map(|b| trained.val_acc > b.val_acc)
                .unwrap_or(true);
            if better {
                best    = Some(trained);
                best_lr = lr;
            }
        }
    }

    // The grids are non-empty, so a best candidate always exists
    let best = best.ok_or_else(|| anyhow::anyhow!("the sweep produced no candidates"))?;
    tracing::info!(
        "Best parameters: lr={best_lr}, hidden={}, val_acc={:.3}",
        best.net_cfg.hidden,
        best.val_acc
    );
    Ok(best)
}
