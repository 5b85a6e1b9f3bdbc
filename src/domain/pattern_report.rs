// ============================================================
// Layer 3: PatternReport Domain Type
// ============================================================
// Aggregate habits of one person's password list. Built once per
// analysis run by data::patterns::analyze and written as JSON.
//
// JSON keys keep the names the browser extension already reads:
//   masks     → "XXXDDDS" style class masks → count
//   numbers   → digit → number of passwords containing it
//   words     → substrings of length 3..=7 → count
//   zigzag    → passwords mixing upper and lower case
//   mutations → passwords using leet-speak look-alikes
//   profile   → the three usage rates above, in percent
//
// BTreeMap keeps the JSON output sorted and stable between runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternReport {
    pub masks:     BTreeMap<String, u64>,
    pub numbers:   BTreeMap<String, u64>,
    pub words:     BTreeMap<String, u64>,
    pub zigzag:    u64,
    pub mutations: u64,
    pub profile:   PatternProfile,
}

/// Share of passwords showing each habit, in percent (one decimal).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternProfile {
    pub digit_usage:    f64,
    pub mixed_case:     f64,
    pub mutation_usage: f64,
}

impl PatternReport {
    pub fn mask_count(&self, mask: &str) -> u64 {
        self.masks.get(mask).copied().unwrap_or(0)
    }

    pub fn digit_count(&self, digit: char) -> u64 {
        self.numbers.get(&digit.to_string()).copied().unwrap_or(0)
    }

    pub fn word_count(&self, word: &str) -> u64 {
        self.words.get(word).copied().unwrap_or(0)
    }
}
