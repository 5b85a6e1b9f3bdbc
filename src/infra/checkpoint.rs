// ============================================================
// Layer 6: Checkpoint Store
// ============================================================
// Saves and restores model parameters at an exact path.
//
// Format: Burn's NamedMpkBytesRecorder (MessagePack, full f32
// precision). We ask the recorder for bytes and write them
// ourselves so the file lands at exactly the path the caller
// gave; Burn's file recorders would swap the extension.
//
// The blob carries no vocabulary or architecture metadata.
// Compatibility is checked on load instead. The layer count is
// compared before the record is applied (Burn asserts on a
// length mismatch), then every parameter shape is compared with
// the shapes of the receiving model. A checkpoint saved for a 92-code
// vocabulary never silently loads into a 100-code model.
//
// Reference: Burn Book §5 (Records and Checkpointing)
//            Rust Book §9 (Error Handling)

use std::{fs, path::Path};

use burn::{
    prelude::*,
    record::{FullPrecisionSettings, NamedMpkBytesRecorder, Recorder},
};

use crate::domain::error::PassError;
use crate::infra::write_atomic;
use crate::ml::model::PasswordLstm;

pub struct CheckpointStore;

impl CheckpointStore {
    /// Serialise all parameters of `model` to `path`, replacing any existing file.
    pub fn save<B: Backend>(model: &PasswordLstm<B>, path: &Path) -> Result<(), PassError> {
        let bytes = NamedMpkBytesRecorder::<FullPrecisionSettings>::new()
            .record(model.clone().into_record(), ())
            .map_err(|e| PassError::save(path, format!("{e:?}")))?;

        write_atomic(path, &bytes).map_err(|e| PassError::save(path, e))?;

        tracing::info!("Checkpoint saved to '{}'", path.display());
        Ok(())
    }

    /// Restore parameters from `path` into `model`.
    ///
    /// Fails with `PassError::Load` when the file is missing, cannot be
    /// decoded, or holds parameters of a different shape.
    pub fn load<B: Backend>(
        model:  PasswordLstm<B>,
        path:   &Path,
        device: &B::Device,
    ) -> Result<PasswordLstm<B>, PassError> {
        let bytes = fs::read(path).map_err(|e| PassError::load(path, e))?;

        let record: <PasswordLstm<B> as Module<B>>::Record = NamedMpkBytesRecorder::<FullPrecisionSettings>::new()
            .load(bytes, device)
            .map_err(|e| PassError::load(path, format!("{e:?}")))?;

        if record.layers.len() != model.layers.len() {
            return Err(PassError::load(
                path,
                format!(
                    "checkpoint has {} LSTM layers, model has {}",
                    record.layers.len(),
                    model.layers.len()
                ),
            ));
        }

        let expected = model.param_shapes();
        let loaded   = model.load_record(record);
        let found    = loaded.param_shapes();

        if found != expected {
            return Err(PassError::load(
                path,
                format!("parameter shapes {found:?} do not match model shapes {expected:?}"),
            ));
        }

        tracing::info!("Checkpoint loaded from '{}'", path.display());
        Ok(loaded)
    }
}
