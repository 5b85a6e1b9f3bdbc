// ============================================================
// Layer 6: Infrastructure Layer
// ============================================================
// Everything that touches the filesystem on the way out:
//
//   checkpoint.rs : model parameters ↔ an opaque blob at a path
//                   (Burn named-MessagePack record bytes)
//
//   onnx.rs       : the subset of the ONNX protobuf schema the
//                   exporter writes, as prost messages
//
//   exporter.rs   : traces the model into an ONNX graph with a
//                   variable sequence axis, plus the vocabulary
//                   sidecar JSON
//
//   metrics.rs    : per-epoch mean loss appended to a CSV file
//
//   report.rs     : pattern report as sorted, pretty JSON
//
// Every artifact goes through `write_atomic`, so a downstream
// caller never sees a half-written checkpoint, graph or report.
//
// Reference: Rust Book §9 (Error Handling)
//            Burn Book §5 (Records and Checkpointing)

use std::{fs, io, path::{Path, PathBuf}};

/// Model checkpoint saving and loading
pub mod checkpoint;

/// ONNX protobuf message definitions
pub mod onnx;

/// ONNX graph + vocabulary sidecar export
pub mod exporter;

/// Training metrics CSV logger
pub mod metrics;

/// Pattern report JSON writer
pub mod report;

/// Write `bytes` to a sibling temp file, then rename it over `path`.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp = partial_path(path);
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path).inspect_err(|_| {
        fs::remove_file(&tmp).ok();
    })?;
    tracing::debug!("Wrote {} bytes to '{}'", bytes.len(), path.display());
    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}
