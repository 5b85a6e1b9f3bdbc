// ============================================================
// Layer 5: Training Loop
// ============================================================
// Fits the character LSTM to a person's own passwords with Adam
// and next-character cross-entropy.
//
// Per epoch:
//   1. the loader yields shuffled minibatches (order is a pure
//      function of the run seed)
//   2. forward → loss over every position, padding included
//   3. backward → one Adam step at a fixed learning rate
//   4. mean batch loss is printed, logged and returned
//
// Reproducibility: the backend generator is seeded before the
// model is built (see ml::seed_backend) and the loader shuffles
// with StdRng::seed_from_u64(shuffle_seed). Loading runs on a
// single worker: with more, batches reach the loop in whatever
// order the threads finish.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use burn::{
    data::dataloader::DataLoaderBuilder,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::{backend::AutodiffBackend, ElementConversion},
};

use crate::data::{batcher::PasswordBatcher, dataset::PasswordDataset};
use crate::domain::{error::PassError, rng::RngContext};
use crate::infra::metrics::EpochMetrics;
use crate::ml::model::PasswordLstm;

const LOADER_WORKERS: usize = 1;

#[derive(Config, Debug)]
pub struct TrainerConfig {
    #[config(default = 5)]
    pub epochs: usize,

    #[config(default = 64)]
    pub batch_size: usize,

    #[config(default = 1e-3)]
    pub learning_rate: f64,
}

/// Train `model` on `dataset` and return it with one metrics row per epoch.
///
/// An empty dataset is rejected before any step is taken, so the caller
/// still owns an untouched model state on disk.
pub fn fit<B: AutodiffBackend>(
    mut model: PasswordLstm<B>,
    dataset:   PasswordDataset,
    cfg:       &TrainerConfig,
    rng:       &RngContext,
    device:    &B::Device,
) -> Result<(PasswordLstm<B>, Vec<EpochMetrics>), PassError> {
    if dataset.is_empty() {
        return Err(PassError::EmptyDataset);
    }
    tracing::info!(
        "Training on {} passwords: {} epochs, batch size {}, lr {}",
        dataset.sample_count(),
        cfg.epochs,
        cfg.batch_size,
        cfg.learning_rate,
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update)
    let mut optim = AdamConfig::new().with_epsilon(1e-8).init();

    // ── Shuffled data loader ──────────────────────────────────────────────────
    let batcher = PasswordBatcher::<B>::new(device.clone());
    let loader  = DataLoaderBuilder::new(batcher)
        .batch_size(cfg.batch_size)
        .shuffle(rng.shuffle_seed())
        .num_workers(LOADER_WORKERS)
        .build(dataset);

    // ── Epoch loop ────────────────────────────────────────────────────────────
    let mut history = Vec::with_capacity(cfg.epochs);
    for epoch in 1..=cfg.epochs {
        let mut loss_sum = 0.0f64;
        let mut batches  = 0usize;

        for batch in loader.iter() {
            let loss = model.forward_loss(batch.inputs, batch.targets);

            loss_sum += loss.clone().into_scalar().elem::<f64>();
            batches  += 1;

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.learning_rate, model, grads);
        }

        let mean_loss = loss_sum / batches.max(1) as f64;
        println!("Epoch {:>3}/{} | loss={:.4}", epoch, cfg.epochs, mean_loss);
        tracing::info!("Epoch {} finished: mean loss {:.4} over {} batches", epoch, mean_loss, batches);

        history.push(EpochMetrics::new(epoch, mean_loss, batches));
    }

    Ok((model, history))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::encoder::SequenceEncoder;
    use crate::domain::vocabulary::Vocabulary;
    use crate::ml::{lock_backend_rng, model::PasswordLstmConfig, seed_backend, TrainBackend};

    const PASSWORDS: [&str; 5] = ["Abc123!", "abc1234", "Qwerty77", "dragon", "Abc123$"];

    fn run(seed: u64, epochs: usize) -> (Vec<Vec<f32>>, Vec<EpochMetrics>) {
        let rng     = RngContext::new(seed);
        let device  = Default::default();
        let vocab   = Vocabulary::new();
        let dataset = SequenceEncoder::new(&vocab, 8).encode_batch(&PASSWORDS);

        seed_backend::<TrainBackend>(&rng);
        let model = PasswordLstmConfig::new(vocab.size()).init::<TrainBackend>(&device);
        let cfg   = TrainerConfig::new().with_epochs(epochs).with_batch_size(2);

        let (model, history) = fit(model, dataset, &cfg, &rng, &device).unwrap();
        (model.param_values(), history)
    }

    #[test]
    fn test_empty_dataset_is_rejected() {
        let _guard  = lock_backend_rng();
        let device  = Default::default();
        let model   = PasswordLstmConfig::new(92).init::<TrainBackend>(&device);
        let dataset = PasswordDataset::new(Vec::new());
        let result  = fit(model, dataset, &TrainerConfig::new(), &RngContext::default(), &device);
        assert!(matches!(result, Err(PassError::EmptyDataset)));
    }

    #[test]
    fn test_same_seed_gives_identical_weights() {
        let _guard = lock_backend_rng();
        let (a, history_a) = run(42, 2);
        let (b, history_b) = run(42, 2);
        assert_eq!(a, b);
        assert_eq!(history_a, history_b);
    }

    #[test]
    fn test_different_seed_gives_different_weights() {
        let _guard = lock_backend_rng();
        let (a, _) = run(1, 1);
        let (b, _) = run(2, 1);
        assert_ne!(a, b);
    }

    #[test]
    fn test_reports_one_row_per_epoch() {
        let _guard      = lock_backend_rng();
        let (_, history) = run(42, 3);
        assert_eq!(history.len(), 3);
        for (i, m) in history.iter().enumerate() {
            assert_eq!(m.epoch, i + 1);
            // 5 samples in batches of 2 → 3 batches
            assert_eq!(m.batches, 3);
            assert!(m.mean_loss.is_finite());
        }
    }

    #[test]
    fn test_loss_goes_down() {
        let _guard       = lock_backend_rng();
        let (_, history) = run(42, 15);
        let first = history.first().unwrap().mean_loss;
        let last  = history.last().unwrap().mean_loss;
        assert!(last < first, "loss went from {first} to {last}");
    }
}
