use burn::{
    nn::{
        Dropout, DropoutConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::relu,
    tensor::backend::AutodiffBackend,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct FeatureNetConfig {
    /// Width of the input vector, one slot per trait
    pub num_traits: usize,

    /// Number of animal classes in the output
    pub num_classes: usize,

    /// First hidden layer width; the second is half of it
    #[config(default = 64)]
    pub hidden: usize,

    #[config(default = 0.3)]
    pub dropout: f64,
}

impl FeatureNetConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> FeatureNet<B> {
        FeatureNet {
            fc1:     LinearConfig::new(self.num_traits, self.hidden).init(device),
            fc2:     LinearConfig::new(self.hidden, self.hidden / 2).init(device),
            out:     LinearConfig::new(self.hidden / 2, self.num_classes).init(device),
            dropout: DropoutConfig::new(self.dropout).init(),
        }
    }
}

/// The tabular classifier: trait scores in, class logits out.
#[derive(Module, Debug)]
pub struct FeatureNet<B: Backend> {
    pub fc1:     Linear<B>,
    pub fc2:     Linear<B>,
    pub out:     Linear<B>,
    pub dropout: Dropout,
}

impl<B: Backend> FeatureNet<B> {
    /// inputs: [batch, num_traits] → logits: [batch, num_classes]
    pub fn forward(&self, inputs: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.dropout.forward(relu(self.fc1.forward(inputs)));
        let x = self.dropout.forward(relu(self.fc2.forward(x)));
        self.out.forward(x)
    }

    pub fn forward_loss(
        &self,
        inputs:  Tensor<B, 2>,
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
