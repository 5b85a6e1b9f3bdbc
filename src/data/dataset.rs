use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

/// One encoded password: the padded input codes and the same
/// codes shifted left by one (next-character targets).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordSample {
    pub input:  Vec<u32>,
    pub target: Vec<u32>,
}

pub struct PasswordDataset {
    samples: Vec<PasswordSample>,
}

impl PasswordDataset {
    pub fn new(samples: Vec<PasswordSample>) -> Self { Self { samples } }

    pub fn sample_count(&self) -> usize { self.samples.len() }

    pub fn is_empty(&self) -> bool { self.samples.is_empty() }

    pub fn samples(&self) -> &[PasswordSample] { &self.samples }
}

impl Dataset<PasswordSample> for PasswordDataset {
    fn get(&self, index: usize) -> Option<PasswordSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
