//! Core types for the verse quiz.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default share of characters that must be present for a fuzzy match.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.70;

/// Default minimum length of the shorter string before fuzzy matching applies.
pub const DEFAULT_MIN_FUZZY_LENGTH: usize = 5;

/// Default number of choices offered in multiple-choice modes.
pub const DEFAULT_OPTION_COUNT: usize = 4;

/// A single verse. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub number: u32,
    pub script_text: String,
    pub transliteration: String,
    pub translation: String,
}

/// A surah with its verses in ascending verse order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surah {
    pub number: u32,
    pub name: String,
    pub name_arabic: String,
    pub verses: Vec<Verse>,
}

/// One question per verse, tagged with the surah it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub surah_number: u32,
    pub surah_name: String,
    pub verse: Verse,
}

impl Question {
    pub fn new(surah: &Surah, verse: &Verse) -> Self {
        Self {
            surah_number: surah.number,
            surah_name: surah.name.clone(),
            verse: verse.clone(),
        }
    }
}

/// Game modes a session can be played in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Pick the translation of the shown verse.
    Translation,
    /// Pick the word removed from the verse.
    MissingWord,
    /// Type the verse from its translation.
    TypedRecall,
    /// Put the verse's words back in order.
    Ordering,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [
        Self::Translation,
        Self::MissingWord,
        Self::TypedRecall,
        Self::Ordering,
    ];

    /// Get the mode name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Translation => "translation",
            Self::MissingWord => "missing_word",
            Self::TypedRecall => "typed_recall",
            Self::Ordering => "ordering",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "translation" => Some(Self::Translation),
            "missing_word" => Some(Self::MissingWord),
            "typed_recall" => Some(Self::TypedRecall),
            "ordering" => Some(Self::Ordering),
            _ => None,
        }
    }

    /// Whether answers in this mode are free text.
    pub fn is_free_text(&self) -> bool {
        matches!(self, Self::TypedRecall)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered option with its stable id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: String,
    pub text: String,
    /// Secondary line, e.g. the transliteration under a script option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Tunables for a quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSettings {
    pub option_count: usize,
    pub fuzzy_threshold: f64,
    pub min_fuzzy_length: usize,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            option_count: DEFAULT_OPTION_COUNT,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            min_fuzzy_length: DEFAULT_MIN_FUZZY_LENGTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_mode_round_trips_through_str() {
        for mode in GameMode::ALL {
            assert_eq!(GameMode::from_str(mode.as_str()), Some(mode));
        }
        assert_eq!(GameMode::from_str("flip"), None);
    }

    #[test]
    fn game_mode_serializes_snake_case() {
        let json = serde_json::to_string(&GameMode::MissingWord).unwrap();
        assert_eq!(json, "\"missing_word\"");
    }

    #[test]
    fn default_settings_match_matcher_constants() {
        let settings = QuizSettings::default();
        assert_eq!(settings.fuzzy_threshold, 0.70);
        assert_eq!(settings.min_fuzzy_length, 5);
        assert_eq!(settings.option_count, 4);
    }

    #[test]
    fn only_typed_recall_is_free_text() {
        let free: Vec<_> = GameMode::ALL.iter().filter(|m| m.is_free_text()).collect();
        assert_eq!(free, vec![&GameMode::TypedRecall]);
    }
}
