// ============================================================
// Layer 5: Strength Scorer
// ============================================================
// Scores how predictable a candidate password is under the
// person's own fitted model. A password built from the user's
// habitual masks and substrings gets a low average loss, which
// means it is weak for this user in particular.
//
//   avg     = mean next-char cross-entropy over max_len positions
//   percent = clamp((avg - 1.5) / (2.5 - 1.5), 0, 1) × 100
//
// 1.5 ≈ a typical habitual password, 2.5 ≈ random characters.
use std::path::Path;

use burn::{prelude::*, tensor::ElementConversion};

use crate::data::encoder::SequenceEncoder;
use crate::domain::{error::PassError, vocabulary::Vocabulary};
use crate::infra::checkpoint::CheckpointStore;
use crate::ml::model::{PasswordLstm, PasswordLstmConfig};
use crate::ml::InferBackend;

/// Average loss of a habitual password.
pub const WEAK_LOSS: f64 = 1.5;
/// Average loss of a random string.
pub const STRONG_LOSS: f64 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrengthScore {
    /// Mean next-character cross-entropy
    pub avg_loss: f64,
    /// 0 = fully predictable, 100 = as surprising as random text
    pub percent:  u8,
}

pub struct Inferencer {
    model:   PasswordLstm<InferBackend>,
    vocab:   Vocabulary,
    max_len: usize,
    device:  <InferBackend as Backend>::Device,
}

impl Inferencer {
    pub fn from_checkpoint(path: &Path, max_len: usize) -> Result<Self, PassError> {
        let device = Default::default();
        let vocab  = Vocabulary::new();
        let model  = PasswordLstmConfig::new(vocab.size()).init::<InferBackend>(&device);
        let model  = CheckpointStore::load(model, path, &device)?;
        Ok(Self::new(model, vocab, max_len))
    }

    pub fn new(model: PasswordLstm<InferBackend>, vocab: Vocabulary, max_len: usize) -> Self {
        Self { model, vocab, max_len, device: Default::default() }
    }

    pub fn score(&self, password: &str) -> StrengthScore {
        let sample = SequenceEncoder::new(&self.vocab, self.max_len).encode_sample(password);

        let to_tensor = |codes: &[u32]| {
            let codes: Vec<i32> = codes.iter().map(|&c| c as i32).collect();
            Tensor::<InferBackend, 1, Int>::from_ints(codes.as_slice(), &self.device)
                .reshape([1, self.max_len])
        };

        let avg_loss = self
            .model
            .forward_loss(to_tensor(&sample.input), to_tensor(&sample.target))
            .into_scalar()
            .elem::<f64>();

        StrengthScore { avg_loss, percent: strength_percent(avg_loss) }
    }
}

pub fn strength_percent(avg_loss: f64) -> u8 {
    let t = ((avg_loss - WEAK_LOSS) / (STRONG_LOSS - WEAK_LOSS)).clamp(0.0, 1.0);
    (t * 100.0).round() as u8
}
