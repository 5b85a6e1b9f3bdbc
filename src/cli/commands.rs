// ============================================================
// Layer 1: CLI Arguments
// ============================================================
// Flag names keep their underscore spellings (--load_ckpt,
// --save_ckpt, --export_onnx, --max_len, --batch_size): the
// extension build script calls the binary with exactly these.
//
// Reference: Rust Book §12 (Building a CLI Program)
//            clap derive tutorial

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::application::fit_use_case::FitConfig;
use crate::data::{encoder::DEFAULT_MAX_LEN, loader::DEFAULT_COLUMN};
use crate::domain::rng::DEFAULT_SEED;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rate candidate passwords against a fitted checkpoint
    Score(ScoreArgs),
}

/// Arguments of the default (fit) command.
#[derive(Args, Debug)]
pub struct FitArgs {
    /// Password list: .txt (one per line), .csv or .json
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// CSV column holding the password; negative counts from the end
    #[arg(long, default_value_t = DEFAULT_COLUMN, allow_negative_numbers = true)]
    pub col: i64,

    /// Passes over the password list
    #[arg(long, default_value_t = 5)]
    pub epochs: usize,

    /// Base checkpoint to start from
    #[arg(long = "load_ckpt")]
    pub load_ckpt: Option<PathBuf>,

    /// Where to save the fitted checkpoint
    #[arg(long = "save_ckpt")]
    pub save_ckpt: Option<PathBuf>,

    /// ONNX graph path; the vocabulary is written next to it as .json
    #[arg(long = "export_onnx")]
    pub export_onnx: Option<PathBuf>,

    /// Pattern report (JSON) over the password list
    #[arg(long, requires = "data")]
    pub patterns: Option<PathBuf>,

    /// Per-epoch loss CSV, appended to if it exists
    #[arg(long, requires = "data")]
    pub metrics: Option<PathBuf>,

    /// Seed for weight init, batch order and the export trace
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Characters kept per password
    #[arg(long = "max_len", default_value_t = DEFAULT_MAX_LEN)]
    pub max_len: usize,

    #[arg(long = "batch_size", default_value_t = 64)]
    pub batch_size: usize,
}

impl From<FitArgs> for FitConfig {
    fn from(a: FitArgs) -> Self {
        FitConfig {
            data:        a.data,
            column:      a.col,
            epochs:      a.epochs,
            load_ckpt:   a.load_ckpt,
            save_ckpt:   a.save_ckpt,
            export_onnx: a.export_onnx,
            patterns:    a.patterns,
            metrics:     a.metrics,
            seed:        a.seed,
            max_len:     a.max_len,
            batch_size:  a.batch_size,
        }
    }
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Fitted checkpoint
    #[arg(long = "load_ckpt")]
    pub load_ckpt: PathBuf,

    /// Candidate password; repeat for several
    #[arg(long = "password", required = true)]
    pub passwords: Vec<String>,

    #[arg(long = "max_len", default_value_t = DEFAULT_MAX_LEN)]
    pub max_len: usize,
}
