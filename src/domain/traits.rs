// ============================================================
// Layer 3: Core Traits (Abstractions)
// ============================================================
// The application layer asks for passwords through a trait, so
// the fit use case does not care whether they come from a text
// dump, a browser CSV export or a JSON vault export.
//
// Implementations:
//   - PasswordFile → .txt / .csv / .json on disk (data::loader)
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use crate::domain::error::PassError;

// ─── PasswordSource ───────────────────────────────────────────────────────────
/// Anything that can hand over an ordered list of raw passwords.
pub trait PasswordSource {
    /// Load every password, preserving source order.
    fn load_all(&self) -> Result<Vec<String>, PassError>;
}
