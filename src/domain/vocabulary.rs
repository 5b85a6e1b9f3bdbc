// ============================================================
// Layer 3: Character Vocabulary
// ============================================================
// Fixed character → code table shared by training, checkpoints,
// scoring and the ONNX export.
//
// Layout (92 codes total):
//   0        → <PAD>   right-padding of short passwords
//   1 ..= 90 → the base characters, in BASE_CHARS order
//   91       → <UNK>   anything outside the base set
//
// The table is built from a constant string, so the same
// character always gets the same code in every process. A
// checkpoint trained under this table therefore stays valid for
// every later run of the binary.
//
// The internal map is private on purpose: callers get `encode`
// and `size`, and the exporter gets the table through `Serialize`.
//
// Reference: Rust Book §8 (Hash Maps)
//            serde documentation (Serializer::collect_map)

use std::collections::HashMap;

use serde::{Serialize, Serializer};

/// Letters, digits and the punctuation the base model was trained on.
pub const BASE_CHARS: &str = concat!(
    "abcdefghijklmnopqrstuvwxyz",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "0123456789",
    "!@#$%^&*()-_=+[]{}|;:,.<>?/\\",
);

pub const PAD_TOKEN: &str = "<PAD>";
pub const UNK_TOKEN: &str = "<UNK>";

/// Code of the padding symbol.
pub const PAD: u32 = 0;

#[derive(Debug, Clone)]
pub struct Vocabulary {
    codes: HashMap<char, u32>,
    unk:   u32,
}

impl Vocabulary {
    pub fn new() -> Self {
        // Codes start at 1 because 0 is reserved for padding
        let codes: HashMap<char, u32> = BASE_CHARS
            .chars()
            .zip(1u32..)
            .collect();
        let unk = codes.len() as u32 + 1;
        Self { codes, unk }
    }

    /// Code of `c`, or `UNK` for characters outside the base set.
    pub fn encode(&self, c: char) -> u32 {
        self.codes.get(&c).copied().unwrap_or(self.unk)
    }

    /// Total number of codes, including PAD and UNK.
    pub fn size(&self) -> usize {
        self.codes.len() + 2
    }

    pub fn unk(&self) -> u32 {
        self.unk
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes the table as `{ "a": 1, ..., "<PAD>": 0, "<UNK>": 91 }`,
/// which is the sidecar format the browser inference code reads.
impl Serialize for Vocabulary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let chars = BASE_CHARS
            .chars()
            .map(|c| (c.to_string(), self.encode(c)));
        let reserved = [
            (PAD_TOKEN.to_string(), PAD),
            (UNK_TOKEN.to_string(), self.unk),
        ];
        serializer.collect_map(chars.chain(reserved))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_counts_reserved_codes() {
        let v = Vocabulary::new();
        assert_eq!(BASE_CHARS.chars().count(), 90);
        assert_eq!(v.size(), 92);
        assert_eq!(PAD, 0);
        assert_eq!(v.unk(), 91);
    }

    #[test]
    fn test_codes_follow_table_order() {
        let v = Vocabulary::new();
        assert_eq!(v.encode('a'), 1);
        assert_eq!(v.encode('z'), 26);
        assert_eq!(v.encode('A'), 27);
        assert_eq!(v.encode('0'), 53);
        assert_eq!(v.encode('!'), 63);
        assert_eq!(v.encode('\\'), 90);
    }

    #[test]
    fn test_encoding_is_stable_across_instances() {
        let a = Vocabulary::new();
        let b = Vocabulary::default();
        for c in BASE_CHARS.chars() {
            assert_eq!(a.encode(c), b.encode(c));
            assert_eq!(a.encode(c), a.encode(c));
        }
    }

    #[test]
    fn test_unknown_chars_map_to_unk() {
        let v = Vocabulary::new();
        for c in [' ', 'é', '€', '\t', '"', '~', '`', '\'', '日'] {
            assert_eq!(v.encode(c), v.unk(), "char {c:?}");
        }
    }

    #[test]
    fn test_every_code_is_unique() {
        let v     = Vocabulary::new();
        let mut seen: Vec<u32> = BASE_CHARS.chars().map(|c| v.encode(c)).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 90);
        assert!(!seen.contains(&PAD));
        assert!(!seen.contains(&v.unk()));
    }

    #[test]
    fn test_serializes_full_table() {
        let v    = Vocabulary::new();
        let json = serde_json::to_value(&v).unwrap();
        let map  = json.as_object().unwrap();
        assert_eq!(map.len(), 92);
        assert_eq!(map["<PAD>"], 0);
        assert_eq!(map["<UNK>"], 91);
        assert_eq!(map["a"], 1);
        assert_eq!(map["\\"], 90);
    }
}
