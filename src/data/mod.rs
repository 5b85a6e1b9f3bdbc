// ============================================================
// Layer 4: Data Pipeline
// ============================================================
// Everything between a password file on disk and tensor batches,
// plus the model-free statistics pass.
//
//   password file (.txt / .csv / .json)
//       │
//       ▼
//   PasswordFile      → reads raw passwords in file order
//       │
//       ├──────────────────────────┐
//       ▼                          ▼
//   SequenceEncoder            patterns::analyze
//   (codes + shifted targets)  (masks, digits, substrings…)
//       │
//       ▼
//   PasswordDataset   → implements Burn's Dataset trait
//       │
//       ▼
//   PasswordBatcher   → stacks samples into [batch, seq] tensors
//       │
//       ▼
//   DataLoader        → shuffled minibatches for the trainer
//
// Reference: Burn Book §4 (Datasets and Dataloaders)
//            Rust Book §13 (Iterators and Closures)

/// Reads .txt / .csv / .json password files
pub mod loader;

/// Fixed-length code sequences and next-character targets
pub mod encoder;

/// Implements Burn's Dataset trait for encoded passwords
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Mask / digit / substring / leet / case statistics
pub mod patterns;
