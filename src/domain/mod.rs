// ============================================================
// Layer 3: Domain Layer
// ============================================================
// Plain Rust types and traits that define what the system is
// about: characters and their codes, seeds, habit reports and
// the ways a run can fail.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Failure taxonomy shared by every layer
pub mod error;

// Fixed character → code table
pub mod vocabulary;

// Explicit seed threaded through the run
pub mod rng;

// Statistics over a password list
pub mod pattern_report;

// Core abstractions (traits) that other layers implement
pub mod traits;
