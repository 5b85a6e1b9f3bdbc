// ============================================================
// Layer 2: FitUseCase
// ============================================================
// Orchestrates one personalisation run, stage by stage. Every
// stage is optional except building the model, and each one
// finishes before the next starts:
//
//   Step 1: Seed the run, build vocabulary + fresh model  (Layer 3/5)
//   Step 2: Restore a base checkpoint       --load_ckpt   (Layer 6)
//   Step 3: Load + encode the password list --data        (Layer 4)
//   Step 4: Fine-tune                                     (Layer 5)
//   Step 5: Append epoch losses             --metrics     (Layer 6)
//   Step 6: Pattern report                  --patterns    (Layer 4/6)
//   Step 7: Save checkpoint                 --save_ckpt   (Layer 6)
//   Step 8: Export ONNX + vocabulary        --export_onnx (Layer 6)
//
// Export runs last so the trained weights are already on disk
// if the export fails.
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Burn Book §5 (Training)

use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use burn::module::AutodiffModule;
use serde::{Deserialize, Serialize};

use crate::data::{
    encoder::{SequenceEncoder, DEFAULT_MAX_LEN},
    loader::{PasswordFile, DEFAULT_COLUMN},
    patterns,
};
use crate::domain::{
    rng::{RngContext, DEFAULT_SEED},
    traits::PasswordSource,
    vocabulary::Vocabulary,
};
use crate::infra::{
    checkpoint::CheckpointStore,
    exporter::OnnxExporter,
    metrics::{EpochMetrics, MetricsLogger},
    report::ReportWriter,
};
use crate::ml::{
    model::{PasswordLstm, PasswordLstmConfig},
    seed_backend,
    trainer::{fit, TrainerConfig},
    TrainBackend,
};

// ─── Run Configuration ───────────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitConfig {
    pub data:        Option<PathBuf>,
    pub column:      i64,
    pub epochs:      usize,
    pub load_ckpt:   Option<PathBuf>,
    pub save_ckpt:   Option<PathBuf>,
    pub export_onnx: Option<PathBuf>,
    pub patterns:    Option<PathBuf>,
    pub metrics:     Option<PathBuf>,
    pub seed:        u64,
    pub max_len:     usize,
    pub batch_size:  usize,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            data:        None,
            column:      DEFAULT_COLUMN,
            epochs:      5,
            load_ckpt:   None,
            save_ckpt:   None,
            export_onnx: None,
            patterns:    None,
            metrics:     None,
            seed:        DEFAULT_SEED,
            max_len:     DEFAULT_MAX_LEN,
            batch_size:  64,
        }
    }
}

/// What a run produced, for the CLI to report.
#[derive(Debug, Default)]
pub struct FitOutcome {
    pub passwords: usize,
    pub history:   Vec<EpochMetrics>,
    pub sidecar:   Option<PathBuf>,
}

// ─── FitUseCase ──────────────────────────────────────────────────────────────
pub struct FitUseCase {
    config: FitConfig,
}

impl FitUseCase {
    pub fn new(config: FitConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<FitOutcome> {
        let cfg = &self.config;
        ensure!(cfg.max_len >= 1, "--max_len must be at least 1");
        ensure!(cfg.batch_size >= 1, "--batch_size must be at least 1");

        let mut outcome = FitOutcome::default();

        // ── Step 1: Seeded model ──────────────────────────────────────────────
        let rng    = RngContext::new(cfg.seed);
        let vocab  = Vocabulary::new();
        let device = Default::default();
        seed_backend::<TrainBackend>(&rng);
        let mut model: PasswordLstm<TrainBackend> =
            PasswordLstmConfig::new(vocab.size()).init(&device);
        tracing::info!("Run seed {}, vocabulary of {} codes", rng.seed(), vocab.size());

        // ── Step 2: Base checkpoint ───────────────────────────────────────────
        if let Some(path) = &cfg.load_ckpt {
            model = CheckpointStore::load(model, path, &device)
                .context("Failed to restore base checkpoint")?;
        }

        // ── Steps 3-6: Data, training, metrics, patterns ──────────────────────
        if let Some(path) = &cfg.data {
            let passwords = PasswordFile::new(path, cfg.column)
                .load_all()
                .context("Failed to load password list")?;
            outcome.passwords = passwords.len();

            let dataset = SequenceEncoder::new(&vocab, cfg.max_len).encode_batch(&passwords);
            let trainer = TrainerConfig::new()
                .with_epochs(cfg.epochs)
                .with_batch_size(cfg.batch_size);

            let (trained, history) = fit(model, dataset, &trainer, &rng, &device)
                .context("Training failed")?;
            model = trained;

            if let Some(csv) = &cfg.metrics {
                MetricsLogger::new(csv)
                    .and_then(|logger| logger.log_all(&history))
                    .context("Failed to write epoch metrics")?;
            }
            outcome.history = history;

            if let Some(report_path) = &cfg.patterns {
                ReportWriter::write(&patterns::analyze(&passwords), report_path)
                    .context("Failed to write pattern report")?;
            }
        }

        // ── Step 7: Checkpoint ────────────────────────────────────────────────
        if let Some(path) = &cfg.save_ckpt {
            CheckpointStore::save(&model, path).context("Failed to save checkpoint")?;
        }

        // ── Step 8: ONNX export ───────────────────────────────────────────────
        if let Some(path) = &cfg.export_onnx {
            let sidecar = OnnxExporter::new(&vocab, cfg.max_len, rng)
                .export(&model.valid(), path)
                .context("Failed to export ONNX model")?;
            outcome.sidecar = Some(sidecar);
        }

        Ok(outcome)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, path::Path};
    use crate::domain::error::PassError;
    use crate::ml::lock_backend_rng;

    fn write_passwords(dir: &Path) -> PathBuf {
        let path = dir.join("mine.txt");
        fs::write(&path, "Abc123!\nabc1234\nP@ssw0rd\ndragon77\n").unwrap();
        path
    }

    fn quick(dir: &Path) -> FitConfig {
        FitConfig {
            data:       Some(write_passwords(dir)),
            epochs:     1,
            max_len:    12,
            batch_size: 2,
            ..FitConfig::default()
        }
    }

    fn root_cause(err: &anyhow::Error) -> Option<&PassError> {
        err.chain().find_map(|e| e.downcast_ref::<PassError>())
    }

    #[test]
    fn test_full_run_writes_every_artifact() {
        let _guard = lock_backend_rng();
        let dir    = tempfile::tempdir().unwrap();
        let cfg    = FitConfig {
            save_ckpt:   Some(dir.path().join("me.ckpt")),
            export_onnx: Some(dir.path().join("me.onnx")),
            patterns:    Some(dir.path().join("patterns.json")),
            metrics:     Some(dir.path().join("loss.csv")),
            ..quick(dir.path())
        };

        let outcome = FitUseCase::new(cfg).execute().unwrap();
        assert_eq!(outcome.passwords, 4);
        assert_eq!(outcome.history.len(), 1);
        assert_eq!(outcome.sidecar, Some(dir.path().join("me.json")));

        for name in ["me.ckpt", "me.onnx", "me.json", "patterns.json", "loss.csv"] {
            assert!(dir.path().join(name).exists(), "{name} missing");
        }

        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("patterns.json")).unwrap()).unwrap();
        assert_eq!(report["masks"]["XXXDDDS"], 1);
        // Every line holds a look-alike digit or '@'
        assert_eq!(report["mutations"], 4);
        assert_eq!(report["zigzag"], 2);
    }

    #[test]
    fn test_saved_checkpoint_resumes() {
        let _guard = lock_backend_rng();
        let dir    = tempfile::tempdir().unwrap();
        let ckpt   = dir.path().join("base.ckpt");

        FitUseCase::new(FitConfig { save_ckpt: Some(ckpt.clone()), ..quick(dir.path()) })
            .execute()
            .unwrap();
        let resumed = FitUseCase::new(FitConfig { load_ckpt: Some(ckpt), ..quick(dir.path()) })
            .execute()
            .unwrap();
        assert_eq!(resumed.history.len(), 1);
    }

    #[test]
    fn test_missing_checkpoint_aborts() {
        let _guard = lock_backend_rng();
        let dir    = tempfile::tempdir().unwrap();
        let save   = dir.path().join("out.ckpt");
        let cfg    = FitConfig {
            load_ckpt: Some(dir.path().join("absent.ckpt")),
            save_ckpt: Some(save.clone()),
            ..quick(dir.path())
        };

        let err = FitUseCase::new(cfg).execute().unwrap_err();
        assert!(matches!(root_cause(&err), Some(PassError::Load { .. })));
        assert!(!save.exists());
    }

    #[test]
    fn test_empty_list_is_rejected() {
        let _guard = lock_backend_rng();
        let dir    = tempfile::tempdir().unwrap();
        let data   = dir.path().join("empty.txt");
        fs::write(&data, "").unwrap();

        let err = FitUseCase::new(FitConfig { data: Some(data), ..FitConfig::default() })
            .execute()
            .unwrap_err();
        assert!(matches!(root_cause(&err), Some(PassError::EmptyDataset)));
    }

    #[test]
    fn test_unknown_extension_is_format_error() {
        let _guard = lock_backend_rng();
        let dir    = tempfile::tempdir().unwrap();
        let data   = dir.path().join("list.xlsx");
        fs::write(&data, "x").unwrap();

        let err = FitUseCase::new(FitConfig { data: Some(data), ..FitConfig::default() })
            .execute()
            .unwrap_err();
        assert!(matches!(root_cause(&err), Some(PassError::Format { .. })));
    }

    #[test]
    fn test_zero_max_len_is_rejected() {
        let cfg = FitConfig { max_len: 0, ..FitConfig::default() };
        assert!(FitUseCase::new(cfg).execute().is_err());
    }

    #[test]
    fn test_export_without_data_uses_fresh_weights() {
        let _guard = lock_backend_rng();
        let dir    = tempfile::tempdir().unwrap();
        let cfg    = FitConfig { export_onnx: Some(dir.path().join("base.onnx")), ..FitConfig::default() };

        let outcome = FitUseCase::new(cfg).execute().unwrap();
        assert!(outcome.history.is_empty());
        assert!(dir.path().join("base.onnx").exists());
        assert!(dir.path().join("base.json").exists());
    }

    #[test]
    fn test_checkpoint_survives_failed_export() {
        let _guard = lock_backend_rng();
        let dir    = tempfile::tempdir().unwrap();
        let ckpt   = dir.path().join("me.ckpt");
        let cfg    = FitConfig {
            save_ckpt:   Some(ckpt.clone()),
            // Collides with its own vocabulary sidecar
            export_onnx: Some(dir.path().join("me.json")),
            ..quick(dir.path())
        };

        let err = FitUseCase::new(cfg).execute().unwrap_err();
        assert!(matches!(root_cause(&err), Some(PassError::Export { .. })));
        assert!(ckpt.exists());
    }
}
