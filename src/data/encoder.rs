// ============================================================
// Layer 4: Sequence Encoder
// ============================================================
// Turns raw passwords into fixed-length code sequences plus the
// next-character targets the model is trained on.
//
// Example with max_len = 6 (a=1, b=2, c=3, PAD=0):
//   "abc"  → input  [1, 2, 3, 0, 0, 0]
//            target [2, 3, 0, 0, 0, 0]
//
// target[i] = input[i + 1], and the last target is always PAD.
// Longer passwords are truncated to max_len before the shift,
// so the target of the final kept character is PAD too.
//
// Order is preserved; shuffling is the data loader's job.

use crate::data::dataset::{PasswordDataset, PasswordSample};
use crate::domain::vocabulary::{Vocabulary, PAD};

/// Sequence length used when the caller does not pass `--max_len`.
pub const DEFAULT_MAX_LEN: usize = 50;

pub struct SequenceEncoder<'a> {
    vocab:   &'a Vocabulary,
    max_len: usize,
}

impl<'a> SequenceEncoder<'a> {
    pub fn new(vocab: &'a Vocabulary, max_len: usize) -> Self {
        Self { vocab, max_len }
    }

    /// Codes for `password`, truncated and right-padded to exactly max_len.
    pub fn encode(&self, password: &str) -> Vec<u32> {
        let mut codes: Vec<u32> = password
            .chars()
            .take(self.max_len)
            .map(|c| self.vocab.encode(c))
            .collect();
        codes.resize(self.max_len, PAD);
        codes
    }

    /// Input/target pair for one password.
    pub fn encode_sample(&self, password: &str) -> PasswordSample {
        let input = self.encode(password);
        let mut target: Vec<u32> = input.iter().skip(1).copied().collect();
        target.push(PAD);
        PasswordSample { input, target }
    }

    pub fn encode_batch<S: AsRef<str>>(&self, passwords: &[S]) -> PasswordDataset {
        let samples = passwords
            .iter()
            .map(|p| self.encode_sample(p.as_ref()))
            .collect();
        PasswordDataset::new(samples)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pads_to_max_len_and_shifts_target() {
        let vocab  = Vocabulary::new();
        let enc    = SequenceEncoder::new(&vocab, 6);
        let sample = enc.encode_sample("abc");
        assert_eq!(sample.input,  vec![1, 2, 3, 0, 0, 0]);
        assert_eq!(sample.target, vec![2, 3, 0, 0, 0, 0]);
    }

    #[test]
    fn test_every_sample_has_exact_length() {
        let vocab = Vocabulary::new();
        let enc   = SequenceEncoder::new(&vocab, DEFAULT_MAX_LEN);
        let long  = "x".repeat(120);
        for pw in ["", "a", "Passw0rd!", long.as_str(), "ünïcødé"] {
            let s = enc.encode_sample(pw);
            assert_eq!(s.input.len(),  DEFAULT_MAX_LEN);
            assert_eq!(s.target.len(), DEFAULT_MAX_LEN);
            for i in 0..DEFAULT_MAX_LEN - 1 {
                assert_eq!(s.target[i], s.input[i + 1]);
            }
            assert_eq!(s.target[DEFAULT_MAX_LEN - 1], PAD);
        }
    }

    #[test]
    fn test_truncates_long_passwords() {
        let vocab  = Vocabulary::new();
        let enc    = SequenceEncoder::new(&vocab, 3);
        let sample = enc.encode_sample("abcdef");
        assert_eq!(sample.input,  vec![1, 2, 3]);
        assert_eq!(sample.target, vec![2, 3, 0]);
    }

    #[test]
    fn test_empty_password_is_all_pad() {
        let vocab  = Vocabulary::new();
        let enc    = SequenceEncoder::new(&vocab, 4);
        let sample = enc.encode_sample("");
        assert_eq!(sample.input,  vec![0; 4]);
        assert_eq!(sample.target, vec![0; 4]);
    }

    #[test]
    fn test_unknown_chars_become_unk() {
        let vocab = Vocabulary::new();
        let enc   = SequenceEncoder::new(&vocab, 3);
        assert_eq!(enc.encode("a é"), vec![1, vocab.unk(), vocab.unk()]);
    }

    #[test]
    fn test_batch_keeps_input_order() {
        let vocab   = Vocabulary::new();
        let enc     = SequenceEncoder::new(&vocab, 2);
        let dataset = enc.encode_batch(&["b", "a", "c"]);
        let firsts: Vec<u32> = dataset.samples().iter().map(|s| s.input[0]).collect();
        assert_eq!(firsts, vec![2, 1, 3]);
    }
}
