//! Answer evaluation for typed verse recall.
//!
//! An answer is accepted when, in order:
//! 1. it matches the script text once vowel marks and elongation are removed,
//! 2. it matches the transliteration after case and punctuation folding,
//! 3. enough of the shorter transliteration's characters appear in the longer one.
//!
//! Every function here is total: malformed input yields a non-match, never an error.

use crate::types::{QuizSettings, DEFAULT_FUZZY_THRESHOLD, DEFAULT_MIN_FUZZY_LENGTH};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Arabic tatweel (kashida), used only to stretch words.
const TATWEEL: char = '\u{0640}';

/// Which step accepted (or rejected) an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Input was empty after trimming.
    Empty,
    /// Script text matched with diacritics removed.
    Script,
    /// Normalized transliteration matched exactly.
    Transliteration,
    /// Character-presence similarity cleared the threshold.
    Fuzzy,
    /// Nothing matched.
    NoMatch,
}

/// Result of evaluating a typed answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub is_correct: bool,
    pub strategy: MatchStrategy,
    /// Similarity between 0.0 and 1.0. Exact matches report 1.0.
    pub similarity: f64,
    /// Normalized typed answer (for display).
    pub normalized_input: String,
    /// Normalized transliteration (for display).
    pub normalized_expected: String,
}

/// Check a typed answer against a verse's script text and transliteration.
pub fn check_answer(user_answer: &str, script_text: &str, transliteration: &str) -> bool {
    evaluate_answer(user_answer, script_text, transliteration).is_correct
}

/// Evaluate a typed answer using the default thresholds.
pub fn evaluate_answer(user_answer: &str, script_text: &str, transliteration: &str) -> MatchResult {
    evaluate_answer_with(
        user_answer,
        script_text,
        transliteration,
        DEFAULT_FUZZY_THRESHOLD,
        DEFAULT_MIN_FUZZY_LENGTH,
    )
}

/// Evaluate a typed answer with the thresholds from `settings`.
pub fn evaluate_with_settings(
    user_answer: &str,
    script_text: &str,
    transliteration: &str,
    settings: &QuizSettings,
) -> MatchResult {
    evaluate_answer_with(
        user_answer,
        script_text,
        transliteration,
        settings.fuzzy_threshold,
        settings.min_fuzzy_length,
    )
}

fn evaluate_answer_with(
    user_answer: &str,
    script_text: &str,
    transliteration: &str,
    fuzzy_threshold: f64,
    min_fuzzy_length: usize,
) -> MatchResult {
    let trimmed = user_answer.trim();
    if trimmed.is_empty() {
        return MatchResult {
            is_correct: false,
            strategy: MatchStrategy::Empty,
            similarity: 0.0,
            normalized_input: String::new(),
            normalized_expected: normalize_transliteration(transliteration),
        };
    }

    let normalized_input = normalize_transliteration(trimmed);
    let normalized_expected = normalize_transliteration(transliteration);

    if strip_diacritics(trimmed) == strip_diacritics(script_text.trim()) {
        return MatchResult {
            is_correct: true,
            strategy: MatchStrategy::Script,
            similarity: 1.0,
            normalized_input,
            normalized_expected,
        };
    }

    if normalized_input == normalized_expected {
        return MatchResult {
            is_correct: true,
            strategy: MatchStrategy::Transliteration,
            similarity: 1.0,
            normalized_input,
            normalized_expected,
        };
    }

    let (similarity, shorter_len) =
        character_presence_similarity(&normalized_input, &normalized_expected);
    let is_correct = shorter_len >= min_fuzzy_length && similarity >= fuzzy_threshold;

    MatchResult {
        is_correct,
        strategy: if is_correct {
            MatchStrategy::Fuzzy
        } else {
            MatchStrategy::NoMatch
        },
        similarity,
        normalized_input,
        normalized_expected,
    }
}

/// Whether `c` is a vowel, gemination or Quranic annotation mark.
fn is_arabic_mark(c: char) -> bool {
    matches!(
        c,
        '\u{0610}'..='\u{061A}'
            | '\u{064B}'..='\u{065F}'
            | '\u{0670}'
            | '\u{06D6}'..='\u{06DC}'
            | '\u{06DF}'..='\u{06E4}'
            | '\u{06E7}'..='\u{06E8}'
            | '\u{06EA}'..='\u{06ED}'
    )
}

/// Remove vowel marks and tatweel, leaving the consonantal skeleton.
pub fn strip_diacritics(text: &str) -> String {
    text.chars()
        .filter(|&c| c != TATWEEL && !is_arabic_mark(c))
        .collect()
}

/// Lower-case, drop punctuation and collapse whitespace.
pub fn normalize_transliteration(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|&c| c.is_alphanumeric() || c == '_' || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Share of the shorter string's characters that occur anywhere in the longer one.
///
/// Returns the similarity together with the shorter string's length in
/// characters. On equal lengths `a` is treated as the shorter string.
/// An empty shorter string scores 0.0.
pub fn character_presence_similarity(a: &str, b: &str) -> (f64, usize) {
    let a_len = a.chars().count();
    let b_len = b.chars().count();
    let (shorter, longer, shorter_len) = if a_len > b_len {
        (b, a, b_len)
    } else {
        (a, b, a_len)
    };

    if shorter_len == 0 {
        return (0.0, 0);
    }

    let longer_chars: HashSet<char> = longer.chars().collect();
    let matches = shorter
        .chars()
        .filter(|c| longer_chars.contains(c))
        .count();

    (matches as f64 / shorter_len as f64, shorter_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUHA_SCRIPT: &str = "وَالضُّحَىٰ";
    const DUHA_TRANSLIT: &str = "Wa ad-duha";

    #[test]
    fn test_empty_and_whitespace_never_match() {
        assert!(!check_answer("", DUHA_SCRIPT, DUHA_TRANSLIT));
        assert!(!check_answer("   \t\n", DUHA_SCRIPT, DUHA_TRANSLIT));
        assert!(!check_answer("", "", ""));
        assert_eq!(
            evaluate_answer(" ", DUHA_SCRIPT, DUHA_TRANSLIT).strategy,
            MatchStrategy::Empty
        );
    }

    #[test]
    fn test_exact_script_match() {
        let result = evaluate_answer(DUHA_SCRIPT, DUHA_SCRIPT, DUHA_TRANSLIT);
        assert!(result.is_correct);
        assert_eq!(result.strategy, MatchStrategy::Script);
        assert_eq!(result.similarity, 1.0);
    }

    #[test]
    fn test_script_without_vowel_marks() {
        let result = evaluate_answer("والضحى", DUHA_SCRIPT, DUHA_TRANSLIT);
        assert!(result.is_correct);
        assert_eq!(result.strategy, MatchStrategy::Script);
    }

    #[test]
    fn test_tatweel_is_ignored() {
        assert!(check_answer("والضـــحى", DUHA_SCRIPT, DUHA_TRANSLIT));
    }

    #[test]
    fn test_strip_diacritics() {
        assert_eq!(strip_diacritics("وَاللَّيْلِ إِذَا سَجَىٰ"), "والليل إذا سجى");
        assert_eq!(strip_diacritics("plain text"), "plain text");
        assert_eq!(strip_diacritics(""), "");
    }

    #[test]
    fn test_normalize_transliteration() {
        assert_eq!(normalize_transliteration("Wa ad-duha"), "wa adduha");
        assert_eq!(normalize_transliteration("  WA   AD-DUHA! "), "wa adduha");
        assert_eq!(normalize_transliteration("...,;"), "");
        assert_eq!(normalize_transliteration("qul_huwa"), "qul_huwa");
    }

    #[test]
    fn test_transliteration_case_and_punctuation() {
        let result = evaluate_answer("WA AD-DUHA", DUHA_SCRIPT, DUHA_TRANSLIT);
        assert!(result.is_correct);
        assert_eq!(result.strategy, MatchStrategy::Transliteration);
    }

    #[test]
    fn test_transliteration_with_split_word_uses_fuzzy() {
        let result = evaluate_answer("wa ad duha", DUHA_SCRIPT, DUHA_TRANSLIT);
        assert!(result.is_correct);
        assert_eq!(result.strategy, MatchStrategy::Fuzzy);
    }

    #[test]
    fn test_partial_long_passage() {
        assert!(check_answer(
            "Wa al-layli idha",
            "وَاللَّيْلِ إِذَا سَجَىٰ",
            "Wa al-layli idha saja"
        ));
    }

    #[test]
    fn test_wrong_answer() {
        let result = evaluate_answer("wrong answer", DUHA_SCRIPT, DUHA_TRANSLIT);
        assert!(!result.is_correct);
        assert_eq!(result.strategy, MatchStrategy::NoMatch);
        assert!(result.similarity < 0.7);
    }

    #[test]
    fn test_short_guess_below_length_floor() {
        // Every character is present, but four characters are too few.
        let (similarity, len) = character_presence_similarity("wa a", "wa adduha");
        assert_eq!(similarity, 1.0);
        assert_eq!(len, 4);
        assert!(!check_answer("wa a", DUHA_SCRIPT, DUHA_TRANSLIT));
    }

    #[test]
    fn test_length_floor_boundary() {
        // Five characters all present clears the floor.
        assert!(check_answer("wa ad", DUHA_SCRIPT, DUHA_TRANSLIT));
    }

    #[test]
    fn test_similarity_threshold_boundary() {
        // 7 of 10 characters present: exactly 0.70.
        let (similarity, len) = character_presence_similarity("abcdefgxyz", "abcdefghijklmnop");
        assert_eq!(len, 10);
        assert!((similarity - 0.7).abs() < f64::EPSILON);
        assert!(check_answer("abcdefgxyz", "", "abcdefghijklmnop"));

        // 6 of 10 falls short.
        assert!(!check_answer("abcdefwxyz", "", "abcdefghijklmnop"));
    }

    #[test]
    fn test_similarity_tie_uses_first_as_shorter() {
        let (similarity, len) = character_presence_similarity("aaaa", "abcd");
        assert_eq!(len, 4);
        assert_eq!(similarity, 1.0);

        let (similarity, _) = character_presence_similarity("abcd", "aaaa");
        assert_eq!(similarity, 0.25);
    }

    #[test]
    fn test_similarity_long_inputs() {
        let shorter = "ab".repeat(50_000);
        let longer = format!("{}xyz", "ba".repeat(50_000));
        let (similarity, len) = character_presence_similarity(&shorter, &longer);
        assert_eq!(len, 100_000);
        assert_eq!(similarity, 1.0);

        let half_missing = "aq".repeat(50_000);
        let (similarity, _) = character_presence_similarity(&half_missing, &longer);
        assert_eq!(similarity, 0.5);
    }

    #[test]
    fn test_similarity_empty_shorter() {
        assert_eq!(character_presence_similarity("", "abc"), (0.0, 0));
        assert_eq!(character_presence_similarity("", ""), (0.0, 0));
    }

    #[test]
    fn test_punctuation_only_input() {
        assert!(!check_answer("?!...", DUHA_SCRIPT, DUHA_TRANSLIT));
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let user = String::from("  WA AD-DUHA ");
        let script = String::from(DUHA_SCRIPT);
        let translit = String::from(DUHA_TRANSLIT);
        check_answer(&user, &script, &translit);
        assert_eq!(user, "  WA AD-DUHA ");
        assert_eq!(script, DUHA_SCRIPT);
        assert_eq!(translit, DUHA_TRANSLIT);
    }

    #[test]
    fn test_custom_settings_raise_threshold() {
        let strict = QuizSettings {
            fuzzy_threshold: 0.95,
            ..Default::default()
        };
        let result = evaluate_with_settings("abcdefgxyz", "", "abcdefghijklmnop", &strict);
        assert!(!result.is_correct);
    }
}
