// ============================================================
// Layer 4 — Feature Batcher
// ============================================================
// Stacks FeatureSamples into tensors for the feature network.
// All samples already have the same width (one value per trait),
// so batching is a flatten plus a reshape.

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::feature_dataset::FeatureSample;

/// A batch of questionnaire samples ready for the forward pass.
#[derive(Debug, Clone)]
pub struct FeatureBatch<B: Backend> {
    /// Trait values, shape [batch_size, num_traits]
    pub inputs: Tensor<B, 2>,

    /// Class indices, shape [batch_size]
    pub targets: Tensor<B, 1, Int>,
}

#[derive(Clone, Debug)]
pub struct FeatureBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> FeatureBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<FeatureSample, FeatureBatch<B>> for FeatureBatcher<B> {
    fn batch(&self, items: Vec<FeatureSample>) -> FeatureBatch<B> {
        let batch_size = items.len();
        let num_traits = items[0].features.len();

        let input_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.features.iter().copied())
            .collect();

        let targets_flat: Vec<i32> = items
            .iter()
            .map(|s| s.label_idx as i32)
            .collect();

        let inputs = Tensor::<B, 1>::from_floats(input_flat.as_slice(), &self.device)
            .reshape([batch_size, num_traits]);

        let targets = Tensor::<B, 1, Int>::from_ints(targets_flat.as_slice(), &self.device);

        FeatureBatch { inputs, targets }
    }
}
