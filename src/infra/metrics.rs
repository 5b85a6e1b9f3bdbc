// ============================================================
// Layer 6: Metrics Logger
// ============================================================
// Appends one row per training epoch to a CSV file:
//
//   epoch,mean_loss,batches
//   1,3.412055,16
//   2,2.874310,16
//
// The header is written only when the file is new, so repeated
// fine-tuning runs on the same profile extend one learning curve.
//
// Reference: Rust Book §12 (I/O and File Handling)
//            csv crate documentation (Writer, WriterBuilder)

use std::{
    fs::OpenOptions,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::domain::error::PassError;

pub const CSV_HEADER: [&str; 3] = ["epoch", "mean_loss", "batches"];

/// Loss summary of a single epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// 1-based
    pub epoch:     usize,
    /// Mean of the per-batch cross-entropy losses
    pub mean_loss: f64,
    pub batches:   usize,
}

impl EpochMetrics {
    pub fn new(epoch: usize, mean_loss: f64, batches: usize) -> Self {
        Self { epoch, mean_loss, batches }
    }
}

pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Open (or create) the CSV at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, PassError> {
        let csv_path = path.into();

        if !csv_path.exists() {
            let mut writer = csv::Writer::from_path(&csv_path)
                .map_err(|e| PassError::save(&csv_path, e))?;
            writer.write_record(CSV_HEADER).map_err(|e| PassError::save(&csv_path, e))?;
            writer.flush()?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, m: &EpochMetrics) -> Result<(), PassError> {
        let file = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .map_err(|e| PassError::save(&self.csv_path, e))?;

        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        writer
            .write_record(&[
                m.epoch.to_string(),
                format!("{:.6}", m.mean_loss),
                m.batches.to_string(),
            ])
            .map_err(|e| PassError::save(&self.csv_path, e))?;
        writer.flush()?;

        tracing::debug!("Logged epoch {} metrics: mean_loss={:.4}", m.epoch, m.mean_loss);
        Ok(())
    }

    pub fn log_all(&self, history: &[EpochMetrics]) -> Result<(), PassError> {
        history.iter().try_for_each(|m| self.log(m))
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_header_then_rows() {
        let dir    = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(dir.path().join("loss.csv")).unwrap();
        logger.log_all(&[EpochMetrics::new(1, 3.5, 4), EpochMetrics::new(2, 2.25, 4)]).unwrap();

        let text = fs::read_to_string(logger.csv_path()).unwrap();
        assert_eq!(text, "epoch,mean_loss,batches\n1,3.500000,4\n2,2.250000,4\n");
    }

    #[test]
    fn test_existing_file_is_appended() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("loss.csv");

        MetricsLogger::new(&path).unwrap().log(&EpochMetrics::new(1, 1.0, 1)).unwrap();
        MetricsLogger::new(&path).unwrap().log(&EpochMetrics::new(1, 0.5, 1)).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<EpochMetrics> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows, vec![EpochMetrics::new(1, 1.0, 1), EpochMetrics::new(1, 0.5, 1)]);
    }

    #[test]
    fn test_missing_directory_is_save_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = MetricsLogger::new(dir.path().join("nope").join("loss.csv")).err().unwrap();
        assert!(matches!(err, PassError::Save { .. }));
    }
}
