// ============================================================
// Layer 5 — Image Network Training
// ============================================================
// Train + validation loop for the convolutional classifier.
// Same shape as the feature trainer, with photo batches.

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_image_use_case::ImageTrainConfig;
use crate::data::image_batcher::ImageBatcher;
use crate::data::image_dataset::{ImageDataset, ImageSample};
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::image_model::{ImageCnn, ImageCnnConfig};

type MyBackend      = burn::backend::Autodiff<burn::backend::Wgpu>;
type MyInnerBackend = burn::backend::Wgpu;

/// A trained image network with its validation accuracy.
pub struct TrainedImageCnn {
    pub model:   ImageCnn<MyBackend>,
    pub net_cfg: ImageCnnConfig,
    pub val_acc: f64,
}

pub fn run_image_training(
    cfg:           &ImageTrainConfig,
    net_cfg:       ImageCnnConfig,
    train_samples: Vec<ImageSample>,
    val_samples:   Vec<ImageSample>,
    metrics:       &MetricsLogger,
) -> Result<TrainedImageCnn> {
    let device = burn::backend::wgpu::WgpuDevice::default();

    let mut model: ImageCnn<MyBackend> = net_cfg.init(&device);
    tracing::info!(
        "Image net ready: {} classes, input {}x{}",
        net_cfg.num_classes, net_cfg.image_size, net_cfg.image_size,
    );

    let optim_cfg = AdamConfig::new().with_epsilon(1e-8);
    let mut optim = optim_cfg.init();

    let train_batcher = ImageBatcher::<MyBackend>::new(device.clone());
    let train_loader  = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(ImageDataset::new(train_samples));

    let val_batcher = ImageBatcher::<MyInnerBackend>::new(device.clone());
    let val_loader  = DataLoaderBuilder::new(val_batcher)
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(ImageDataset::new(val_samples));

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

    Ok(TrainedImageCnn { model, net_cfg, val_acc })
}
