// ============================================================
// Layer 2: Application / Use Cases
// ============================================================
// Orchestrates the other layers to get one job done.
//
// Rules for this layer:
//   - No tensor math (Layer 5)
//   - No terminal output (Layer 1)
//   - No direct file formats (Layers 4 and 6)
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

/// Load → fine-tune → report → checkpoint → export
pub mod fit_use_case;

/// Strength of candidate passwords under a fitted checkpoint
pub mod score_use_case;
