// ============================================================
// Layer 6: Pattern Report Writer
// ============================================================
// Writes a PatternReport as pretty-printed JSON. Keys come out in
// sorted order (the report holds BTreeMaps), so two runs over the
// same list produce byte-identical files.

use std::path::Path;

use crate::domain::{error::PassError, pattern_report::PatternReport};
use crate::infra::write_atomic;

pub struct ReportWriter;

impl ReportWriter {
    pub fn write(report: &PatternReport, path: &Path) -> Result<(), PassError> {
        let json = serde_json::to_string_pretty(report).map_err(|e| PassError::save(path, e))?;
        write_atomic(path, json.as_bytes()).map_err(|e| PassError::save(path, e))?;
        tracing::info!("Pattern report written to '{}'", path.display());
        Ok(())
    }
}
