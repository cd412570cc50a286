// ============================================================
// Layer 4 — Image Batcher
// ============================================================
// Stacks ImageSamples into [batch, 3, H, W] tensors. Samples
// are pre-decoded to a fixed size, so this is again a flatten
// plus a reshape.

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::image_dataset::{ImageSample, CHANNELS, IMAGE_SIZE};

/// A batch of photos ready for the forward pass.
#[derive(Debug, Clone)]
pub struct ImageBatch<B: Backend> {
    /// Pixels, shape [batch_size, 3, IMAGE_SIZE, IMAGE_SIZE]
    pub inputs: Tensor<B, 4>,

    /// Class indices, shape [batch_size]
    pub targets: Tensor<B, 1, Int>,
}

#[derive(Clone, Debug)]
pub struct ImageBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> ImageBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<ImageSample, ImageBatch<B>> for ImageBatcher<B> {
    fn batch(&self, items: Vec<ImageSample>) -> ImageBatch<B> {
        let batch_size = items.len();
        let side       = IMAGE_SIZE as usize;

        let input_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.pixels.iter().copied())
            .collect();

        let targets_flat: Vec<i32> = items
            .iter()
            .map(|s| s.label_idx as i32)
            .collect();

        let inputs = Tensor::<B, 1>::from_floats(input_flat.as_slice(), &self.device)
            .reshape([batch_size, CHANNELS, side, side]);

        let targets = Tensor::<B, 1, Int>::from_ints(targets_flat.as_slice(), &self.device);

        ImageBatch { inputs, targets }
    }
}
