// ============================================================
// Layer 2: ScoreUseCase
// ============================================================
// Rates candidate passwords against a fitted checkpoint:
//
//   Step 1: Rebuild the model and restore the checkpoint (Layer 5/6)
//   Step 2: Score each candidate in input order           (Layer 5)
//
// The checkpoint is mandatory. An untrained model would rate
// everything as random and tell the user nothing.

use std::path::Path;

use anyhow::{ensure, Context, Result};

use crate::ml::inferencer::{Inferencer, StrengthScore};

pub struct ScoreUseCase {
    inferencer: Inferencer,
}

impl ScoreUseCase {
    pub fn new(checkpoint: &Path, max_len: usize) -> Result<Self> {
        ensure!(max_len >= 1, "--max_len must be at least 1");
        let inferencer = Inferencer::from_checkpoint(checkpoint, max_len)
            .context("Failed to load model for scoring")?;
        Ok(Self { inferencer })
    }

    /// One score per password, same order as given.
    pub fn score_all(&self, passwords: &[String]) -> Vec<(String, StrengthScore)> {
        passwords
            .iter()
            .map(|p| (p.clone(), self.inferencer.score(p)))
            .collect()
    }
}

/// `<password>\tavg=<loss>\tstrength=<n>%`
pub fn format_score(password: &str, score: &StrengthScore) -> String {
    format!("{password}\tavg={:.4}\tstrength={}%", score.avg_loss, score.percent)
}
