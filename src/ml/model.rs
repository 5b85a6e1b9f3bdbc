use burn::{
    nn::{
        loss::CrossEntropyLossConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
        Lstm, LstmConfig,
    },
    prelude::*,
};

/// Width of each character embedding.
pub const EMBED_DIM: usize = 64;
/// Hidden size of every LSTM layer.
pub const HIDDEN_DIM: usize = 128;
/// Number of stacked LSTM layers.
pub const NUM_LAYERS: usize = 2;

// Only the vocabulary size varies between runs. The other dimensions are
// architecture constants: checkpoints and ONNX exports depend on them.
#[derive(Config, Debug)]
pub struct PasswordLstmConfig {
    pub vocab_size: usize,
}

impl PasswordLstmConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> PasswordLstm<B> {
        let embedding = EmbeddingConfig::new(self.vocab_size, EMBED_DIM).init(device);
        let layers: Vec<Lstm<B>> = (0..NUM_LAYERS)
            .map(|i| {
                let d_input = if i == 0 { EMBED_DIM } else { HIDDEN_DIM };
                LstmConfig::new(d_input, HIDDEN_DIM, true).init(device)
            })
            .collect();
        let projection = LinearConfig::new(HIDDEN_DIM, self.vocab_size).init(device);
        PasswordLstm { embedding, layers, projection }
    }
}

#[derive(Module, Debug)]
pub struct PasswordLstm<B: Backend> {
    pub embedding:  Embedding<B>,
    pub layers:     Vec<Lstm<B>>,
    pub projection: Linear<B>,
}

impl<B: Backend> PasswordLstm<B> {
    /// inputs: [batch, seq_len] codes → logits: [batch, seq_len, vocab_size]
    ///
    /// Works for any seq_len: the recurrence has no positional state.
    pub fn forward(&self, inputs: Tensor<B, 2, Int>) -> Tensor<B, 3> {
        let mut x = self.embedding.forward(inputs); // [batch, seq_len, EMBED_DIM]
        for lstm in &self.layers {
            let (hidden, _state) = lstm.forward(x, None);
            x = hidden; // [batch, seq_len, HIDDEN_DIM]
        }
        self.projection.forward(x)
    }

    /// Mean next-character cross-entropy over every position.
    ///
    /// Padding positions are NOT masked: the model is also taught to
    /// predict PAD after the end of a password, as the base model was.
    pub fn forward_loss(
        &self,
        inputs:  Tensor<B, 2, Int>,
        targets: Tensor<B, 2, Int>,
    ) -> Tensor<B, 1> {
        let logits = self.forward(inputs);
        let [batch_size, seq_len, vocab_size] = logits.dims();

        let logits  = logits.reshape([batch_size * seq_len, vocab_size]);
        let targets = targets.reshape([batch_size * seq_len]);

        CrossEntropyLossConfig::new()
            .init(&logits.device())
            .forward(logits, targets)
    }

    pub fn vocab_size(&self) -> usize {
        self.embedding.weight.val().dims()[0]
    }

    /// Shape of every parameter, in a fixed order.
    ///
    /// Used to reject checkpoints that were saved for another
    /// architecture or vocabulary.
    pub fn param_shapes(&self) -> Vec<Vec<usize>> {
        let mut shapes = vec![self.embedding.weight.val().dims().to_vec()];
        for lstm in &self.layers {
            for gate in [&lstm.input_gate, &lstm.forget_gate, &lstm.output_gate, &lstm.cell_gate] {
                for linear in [&gate.input_transform, &gate.hidden_transform] {
                    shapes.push(linear.weight.val().dims().to_vec());
                    if let Some(bias) = &linear.bias {
                        shapes.push(bias.val().dims().to_vec());
                    }
                }
            }
        }
        shapes.push(self.projection.weight.val().dims().to_vec());
        if let Some(bias) = &self.projection.bias {
            shapes.push(bias.val().dims().to_vec());
        }
        shapes
    }

    /// Every parameter flattened, same order as `param_shapes`.
    #[cfg(test)]
    pub fn param_values(&self) -> Vec<Vec<f32>> {
        fn values<B: Backend, const D: usize>(t: Tensor<B, D>) -> Vec<f32> {
            t.into_data().convert::<f32>().to_vec::<f32>().unwrap()
        }

        let mut out = vec![values(self.embedding.weight.val())];
        for lstm in &self.layers {
            for gate in [&lstm.input_gate, &lstm.forget_gate, &lstm.output_gate, &lstm.cell_gate] {
                for linear in [&gate.input_transform, &gate.hidden_transform] {
                    out.push(values(linear.weight.val()));
                    if let Some(bias) = &linear.bias {
                        out.push(values(bias.val()));
                    }
                }
            }
        }
        out.push(values(self.projection.weight.val()));
        if let Some(bias) = &self.projection.bias {
            out.push(values(bias.val()));
        }
        out
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::{lock_backend_rng, InferBackend};

    fn codes(device: &<InferBackend as Backend>::Device, batch: usize, len: usize) -> Tensor<InferBackend, 2, Int> {
        let flat: Vec<i32> = (0..batch * len).map(|i| (i % 91) as i32 + 1).collect();
        Tensor::<InferBackend, 1, Int>::from_ints(flat.as_slice(), device).reshape([batch, len])
    }

    #[test]
    fn test_forward_shape() {
        let _guard = lock_backend_rng();
        let device = Default::default();
        let model  = PasswordLstmConfig::new(92).init::<InferBackend>(&device);
        let logits = model.forward(codes(&device, 2, 7));
        assert_eq!(logits.dims(), [2, 7, 92]);
    }

    #[test]
    fn test_forward_accepts_any_length() {
        let _guard = lock_backend_rng();
        let device = Default::default();
        let model  = PasswordLstmConfig::new(92).init::<InferBackend>(&device);
        for len in [1, 3, 50, 64] {
            assert_eq!(model.forward(codes(&device, 1, len)).dims(), [1, len, 92]);
        }
    }

    #[test]
    fn test_loss_is_finite_scalar() {
        let _guard = lock_backend_rng();
        let device = Default::default();
        let model  = PasswordLstmConfig::new(92).init::<InferBackend>(&device);
        let loss   = model.forward_loss(codes(&device, 3, 5), codes(&device, 3, 5));
        assert_eq!(loss.dims(), [1]);
        let value: f32 = loss.into_scalar();
        // Untrained model: close to ln(92) ≈ 4.52
        assert!(value.is_finite());
        assert!(value > 3.0 && value < 6.0, "loss {value}");
    }

    #[test]
    fn test_param_shapes_follow_vocab() {
        let _guard = lock_backend_rng();
        let device = Default::default();
        let model  = PasswordLstmConfig::new(92).init::<InferBackend>(&device);
        let shapes = model.param_shapes();
        assert_eq!(model.vocab_size(), 92);
        assert_eq!(shapes[0], vec![92, EMBED_DIM]);
        assert_eq!(shapes[shapes.len() - 2], vec![HIDDEN_DIM, 92]);
        assert_eq!(shapes[shapes.len() - 1], vec![92]);
        // embedding + 2 layers × 4 gates × 2 linears × (weight, bias) + projection (weight, bias)
        assert_eq!(shapes.len(), 1 + NUM_LAYERS * 16 + 2);
    }
}
