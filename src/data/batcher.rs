// ============================================================
// Layer 4: Password Batcher
// ============================================================
// Implements Burn's Batcher trait to stack a Vec<PasswordSample>
// into two [batch, seq_len] integer tensors.
//
//   Input:  N samples, each with sequences of length S
//   Output: PasswordBatch { inputs: [N, S], targets: [N, S] }
//
// All samples are already padded to the same length by the
// SequenceEncoder, so batching is a flatten + reshape.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::PasswordSample;

#[derive(Debug, Clone)]
pub struct PasswordBatch<B: Backend> {
    /// Input codes, shape [batch_size, seq_len]
    pub inputs: Tensor<B, 2, Int>,

    /// Next-character codes, shape [batch_size, seq_len]
    pub targets: Tensor<B, 2, Int>,
}

#[derive(Clone, Debug)]
pub struct PasswordBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> PasswordBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<PasswordSample, PasswordBatch<B>> for PasswordBatcher<B> {
    fn batch(&self, items: Vec<PasswordSample>) -> PasswordBatch<B> {
        let batch_size = items.len();
        let seq_len    = items.first().map(|s| s.input.len()).unwrap_or(0);

        let input_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.input.iter().map(|&x| x as i32))
            .collect();

        let target_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.target.iter().map(|&x| x as i32))
            .collect();

        let inputs = Tensor::<B, 1, Int>::from_ints(
            input_flat.as_slice(), &self.device
        ).reshape([batch_size, seq_len]);

        let targets = Tensor::<B, 1, Int>::from_ints(
            target_flat.as_slice(), &self.device
        ).reshape([batch_size, seq_len]);

        PasswordBatch { inputs, targets }
    }
}
