// ============================================================
// Layer 4: Pattern Analyzer
// ============================================================
// Pure string statistics over the raw password list. No model,
// no checkpoint: this pass runs even when training is skipped.
//
// One traversal per password feeds five counters:
//
//   1. mask      each char → X (letter) / D (digit) / S (symbol)
//                / _ (anything else), e.g. "Abc123!" → "XXXDDDS"
//   2. numbers   each DISTINCT digit in the password counts once,
//                so "aa11" adds 1 to "1", not 2
//   3. words     every window of 3..=7 chars, sliding by one
//   4. mutations password contains a leet look-alike
//                (0→o 1→i @→a $→s 3→e 5→s 7→t)
//   5. zigzag    password has both an upper and a lower case letter
//
// Windows are taken over chars, not bytes, so non-ASCII input
// never splits a code point.

use std::collections::BTreeSet;

use crate::domain::pattern_report::{PatternProfile, PatternReport};

/// Punctuation classified as `S` in a mask.
pub const MASK_SYMBOLS: &str = "!@#$%^&*()-_=+";

/// Leet-speak look-alikes and the letters they stand for.
pub const LEET_MAP: [(char, char); 7] = [
    ('0', 'o'),
    ('1', 'i'),
    ('@', 'a'),
    ('$', 's'),
    ('3', 'e'),
    ('5', 's'),
    ('7', 't'),
];

pub const MIN_WORD_LEN: usize = 3;
pub const MAX_WORD_LEN: usize = 7;

pub fn mask_of(password: &str) -> String {
    password
        .chars()
        .map(|c| {
            if c.is_alphabetic() {
                'X'
            } else if c.is_ascii_digit() {
                'D'
            } else if MASK_SYMBOLS.contains(c) {
                'S'
            } else {
                '_'
            }
        })
        .collect()
}

/// True when undoing leet substitutions would change the password.
pub fn is_leet_mutation(password: &str) -> bool {
    let restored: String = password
        .chars()
        .map(|c| {
            LEET_MAP
                .iter()
                .find(|&&(from, _)| from == c)
                .map_or(c, |&(_, to)| to)
        })
        .collect();
    restored != password
}

pub fn is_case_mixed(password: &str) -> bool {
    password.chars().any(char::is_uppercase) && password.chars().any(char::is_lowercase)
}

pub fn analyze<S: AsRef<str>>(passwords: &[S]) -> PatternReport {
    let mut report      = PatternReport::default();
    let mut with_digits = 0u64;

    for password in passwords {
        let password = password.as_ref();

        // ── Mask ──────────────────────────────────────────────────────────────
        *report.masks.entry(mask_of(password)).or_insert(0) += 1;

        // ── Distinct digits ───────────────────────────────────────────────────
        let digits: BTreeSet<char> = password.chars().filter(char::is_ascii_digit).collect();
        if !digits.is_empty() {
            with_digits += 1;
        }
        for d in digits {
            *report.numbers.entry(d.to_string()).or_insert(0) += 1;
        }

        // ── Substrings 3..=7 ──────────────────────────────────────────────────
        let chars: Vec<char> = password.chars().collect();
        for len in MIN_WORD_LEN..=MAX_WORD_LEN {
            for window in chars.windows(len) {
                *report.words.entry(window.iter().collect()).or_insert(0) += 1;
            }
        }

        // ── Boolean habits ────────────────────────────────────────────────────
        if is_leet_mutation(password) {
            report.mutations += 1;
        }
        if is_case_mixed(password) {
            report.zigzag += 1;
        }
    }

    let total = passwords.len().max(1) as f64;
    report.profile = PatternProfile {
        digit_usage:    percent(with_digits, total),
        mixed_case:     percent(report.zigzag, total),
        mutation_usage: percent(report.mutations, total),
    };

    tracing::debug!(
        "Analyzed {} passwords: {} masks, {} substrings",
        passwords.len(),
        report.masks.len(),
        report.words.len(),
    );
    report
}

/// Share in percent, rounded to one decimal.
fn percent(count: u64, total: f64) -> f64 {
    (count as f64 / total * 1000.0).round() / 10.0
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_example() {
        let r = analyze(&["Abc123!"]);
        assert_eq!(r.mask_count("XXXDDDS"), 1);
        assert_eq!(r.masks.len(), 1);
    }

    #[test]
    fn test_mask_other_chars() {
        assert_eq!(mask_of("a b.?"), "X_X__");
        assert_eq!(mask_of("é9#"), "XDS");
        assert_eq!(mask_of(""), "");
    }

    #[test]
    fn test_digits_count_once_per_password() {
        let r = analyze(&["aa11"]);
        assert_eq!(r.digit_count('1'), 1);

        let r = analyze(&["1a1", "x1", "22"]);
        assert_eq!(r.digit_count('1'), 2);
        assert_eq!(r.digit_count('2'), 1);
        assert_eq!(r.digit_count('3'), 0);
    }

    #[test]
    fn test_substring_windows() {
        let r = analyze(&["abcd"]);
        assert_eq!(r.word_count("abc"),  1);
        assert_eq!(r.word_count("bcd"),  1);
        assert_eq!(r.word_count("abcd"), 1);
        assert_eq!(r.words.len(), 3);
        assert!(r.words.keys().all(|w| w.chars().count() < 5));
    }

    #[test]
    fn test_substrings_are_case_preserving_and_counted_across_list() {
        let r = analyze(&["Dragon", "dragon99"]);
        assert_eq!(r.word_count("rag"),    2);
        assert_eq!(r.word_count("Dra"),    1);
        assert_eq!(r.word_count("dragon9"), 1);
    }

    #[test]
    fn test_short_passwords_have_no_words() {
        let r = analyze(&["ab", ""]);
        assert!(r.words.is_empty());
    }

    #[test]
    fn test_case_mixing() {
        assert_eq!(analyze(&["Abc"]).zigzag, 1);
        assert_eq!(analyze(&["abc"]).zigzag, 0);
        assert_eq!(analyze(&["ABC"]).zigzag, 0);
        assert_eq!(analyze(&["A1", "b2"]).zigzag, 0);
    }

    #[test]
    fn test_leet_mutation() {
        assert!(is_leet_mutation("p@ssword"));
        assert!(is_leet_mutation("l33t"));
        assert!(!is_leet_mutation("password"));
        assert!(!is_leet_mutation("2468"));
        assert_eq!(analyze(&["h3llo", "hello", "$un"]).mutations, 2);
    }

    #[test]
    fn test_profile_percentages() {
        let r = analyze(&["Abc1", "abc", "p@ss"]);
        assert_eq!(r.profile.digit_usage,    33.3);
        assert_eq!(r.profile.mixed_case,     33.3);
        assert_eq!(r.profile.mutation_usage, 66.7);
    }

    #[test]
    fn test_empty_list() {
        let r = analyze::<&str>(&[]);
        assert_eq!(r, PatternReport::default());
    }

    #[test]
    fn test_report_json_keys() {
        let json = serde_json::to_value(analyze(&["Abc123!"])).unwrap();
        for key in ["masks", "numbers", "words", "zigzag", "mutations", "profile"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["masks"]["XXXDDDS"], 1);
    }
}
