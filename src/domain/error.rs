// ============================================================
// Layer 3: Error Taxonomy
// ============================================================
// Every failure the core can surface. None of them are retried:
// all work is local and deterministic, so a failure is final.
//
//   Format       → the password file is missing, unreadable,
//                  malformed, or has an unknown extension
//   Load         → a requested checkpoint cannot be restored
//                  (never falls back to random weights)
//   EmptyDataset → training was asked to fit zero passwords
//   Export       → the ONNX graph or its vocabulary sidecar
//                  could not be produced
//   Save         → a checkpoint or report could not be written
//
// The application layer wraps these in anyhow with context.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PassError {
    #[error("cannot read passwords from '{path}': {reason}")]
    Format { path: PathBuf, reason: String },

    #[error("cannot load checkpoint '{path}': {reason}")]
    Load { path: PathBuf, reason: String },

    #[error("password dataset is empty, nothing to train on")]
    EmptyDataset,

    #[error("cannot export model to '{path}': {reason}")]
    Export { path: PathBuf, reason: String },

    #[error("cannot write '{path}': {reason}")]
    Save { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PassError {
    pub fn format(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Format { path: path.into(), reason: reason.to_string() }
    }

    pub fn load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Load { path: path.into(), reason: reason.to_string() }
    }

    pub fn export(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Export { path: path.into(), reason: reason.to_string() }
    }

    pub fn save(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Save { path: path.into(), reason: reason.to_string() }
    }
}
