// ============================================================
// Layer 5: ML / Model Layer (Burn)
// ============================================================
// All Burn-specific training and inference code lives here.
//
//   model.rs      : embedding → 2 × LSTM → linear projection,
//                   producing next-character logits per position
//
//   trainer.rs    : shuffled minibatch Adam loop, one mean loss
//                   per epoch
//
//   inferencer.rs : loads a checkpoint and scores how predictable
//                   a candidate password is for this user
//
// Backend choice: NdArray on the CPU. GPU backends do not give
// bit-identical results between runs, and the training set is a
// few thousand short strings at most.
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            Hochreiter & Schmidhuber (1997) LSTM

use burn::prelude::Backend;

use crate::domain::rng::RngContext;

/// Character LSTM architecture
pub mod model;

/// Training loop
pub mod trainer;

/// Password strength scoring from a checkpoint
pub mod inferencer;

pub type InferBackend = burn::backend::NdArray;
pub type TrainBackend = burn::backend::Autodiff<InferBackend>;

/// Seed the backend generator used for weight initialisation.
///
/// Must run before the model is built: parameters are initialised
/// lazily, on first use, from this generator.
pub fn seed_backend<B: Backend>(rng: &RngContext) {
    B::seed(rng.init_seed());
}

/// The ndarray generator is process-global, so tests that build models
/// hold this lock to keep their draws from interleaving.
#[cfg(test)]
pub(crate) fn lock_backend_rng() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
