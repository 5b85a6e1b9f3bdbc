// ============================================================
// Layer 1: CLI / Presentation Layer
// ============================================================
// Parses the command line and hands off to Layer 2.
//
//   passprint [fit flags]               → FitUseCase
//   passprint score --load_ckpt ... \
//             --password ...            → ScoreUseCase
//
// Without a subcommand the fit flags apply, which is how the
// extension build script calls the binary.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, FitArgs, ScoreArgs};

#[derive(Parser, Debug)]
#[command(
    name = "passprint",
    version,
    about = "Fit a character LSTM to your own passwords, export it to ONNX and report your habits.",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub fit: FitArgs,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Some(Commands::Score(args)) => run_score(args),
            None                        => run_fit(self.fit),
        }
    }
}

fn run_fit(args: FitArgs) -> Result<()> {
    use crate::application::fit_use_case::FitUseCase;

    let outcome = FitUseCase::new(args.into()).execute()?;

    if let Some(last) = outcome.history.last() {
        println!(
            "Fitted on {} passwords, final loss {:.4}",
            outcome.passwords, last.mean_loss,
        );
    }
    if let Some(sidecar) = outcome.sidecar {
        println!("Vocabulary written to {}", sidecar.display());
    }
    Ok(())
}

fn run_score(args: ScoreArgs) -> Result<()> {
    use crate::application::score_use_case::{format_score, ScoreUseCase};

    let use_case = ScoreUseCase::new(&args.load_ckpt, args.max_len)?;
    for (password, score) in use_case.score_all(&args.passwords) {
        println!("{}", format_score(&password, &score));
    }
    Ok(())
}
