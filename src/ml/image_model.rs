use burn::{
    nn::{
        conv::{Conv2d, Conv2dConfig},
        pool::{MaxPool2d, MaxPool2dConfig},
        Dropout, DropoutConfig,
        Linear, LinearConfig,
        PaddingConfig2d,
    },
    prelude::*,
    tensor::activation::relu,
    tensor::backend::AutodiffBackend,
};

// Channel widths of the three conv blocks
const C1: usize = 8;
const C2: usize = 16;
const C3: usize = 32;

#[derive(Config, Debug)]
pub struct ImageCnnConfig {
    /// Number of animal classes in the output
    pub num_classes: usize,

    /// Input side length; photos are square after preprocessing
    #[config(default = 224)]
    pub image_size: usize,

    /// Width of the linear layer between features and logits
    #[config(default = 256)]
    pub head_hidden: usize,

    #[config(default = 0.5)]
    pub dropout: f64,
}

impl ImageCnnConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> ImageCnn<B> {
        // Each block halves the spatial size
        let spatial = self.image_size / 8;
        let flat    = C3 * spatial * spatial;

        ImageCnn {
            block1:  build_block(3, C1, device),
            block2:  build_block(C1, C2, device),
            block3:  build_block(C2, C3, device),
            fc:      LinearConfig::new(flat, self.head_hidden).init(device),
            out:     LinearConfig::new(self.head_hidden, self.num_classes).init(device),
            dropout: DropoutConfig::new(self.dropout).init(),
        }
    }
}

fn build_block<B: Backend>(in_ch: usize, out_ch: usize, device: &B::Device) -> ConvBlock<B> {
    ConvBlock {
        conv: Conv2dConfig::new([in_ch, out_ch], [3, 3])
            .with_padding(PaddingConfig2d::Explicit(1, 1))
            .init(device),
        pool: MaxPool2dConfig::new([2, 2])
            .with_strides([2, 2])
            .init(),
    }
}

/// One conv / ReLU / max-pool stage.
#[derive(Module, Debug)]
pub struct ConvBlock<B: Backend> {
    pub conv: Conv2d<B>,
    pub pool: MaxPool2d,
}

impl<B: Backend> ConvBlock<B> {
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        self.pool.forward(relu(self.conv.forward(x)))
    }
}

/// The photo classifier: pixels in, class logits out.
#[derive(Module, Debug)]
pub struct ImageCnn<B: Backend> {
    pub block1:  ConvBlock<B>,
    pub block2:  ConvBlock<B>,
    pub block3:  ConvBlock<B>,
    pub fc:      Linear<B>,
    pub out:     Linear<B>,
    pub dropout: Dropout,
}

impl<B: Backend> ImageCnn<B> {
    /// inputs: [batch, 3, size, size] → logits: [batch, num_classes]
    pub fn forward(&self, inputs: Tensor<B, 4>) -> Tensor<B, 2> {
        let x = self.block1.forward(inputs);
        let x = self.block2.forward(x);
        let x = self.block3.forward(x);

        let x = x.flatten::<2>(1, 3); // [batch, C3 * spatial * spatial]
        let x = self.dropout.forward(relu(self.fc.forward(x)));
        self.out.forward(x)
    }

    pub fn forward_loss(
        &self,
        inputs:  Tensor<B, 4>,
        targets: Tensor<B, 1, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>)
    where
        B: AutodiffBackend,
    {
        let logits = self.forward(inputs);
        let ce = burn::nn::loss::CrossEntropyLossConfig::new()
            .init(&logits.device());
        let loss = ce.forward(logits.clone(), targets);
        (loss, logits)
    }
}
