//! Surah catalog: the question supply for quiz sessions.

use crate::error::{ParseError, Result};
use crate::parser::parse;
use crate::types::{Question, Surah};

/// Verse data compiled into the library.
const BUILTIN_DATA: &str = include_str!("../data/surahs.txt");

/// Surahs sorted ascending by number.
#[derive(Debug, Clone)]
pub struct SurahCatalog {
    surahs: Vec<Surah>,
}

impl SurahCatalog {
    /// Load the built-in catalog.
    pub fn builtin() -> Result<Self> {
        Self::from_data(BUILTIN_DATA)
    }

    /// Parse verse data and build a catalog from it.
    pub fn from_data(content: &str) -> Result<Self> {
        Self::from_surahs(parse(content)?)
    }

    /// Build a catalog from already-loaded surahs.
    pub fn from_surahs(mut surahs: Vec<Surah>) -> Result<Self> {
        if surahs.is_empty() {
            return Err(ParseError::EmptyFile);
        }

        surahs.sort_by_key(|s| s.number);
        if let Some(pair) = surahs.windows(2).find(|w| w[0].number == w[1].number) {
            return Err(ParseError::DuplicateSurah {
                surah: pair[0].number,
            });
        }

        tracing::debug!(count = surahs.len(), "loaded surah catalog");
        Ok(Self { surahs })
    }

    /// All surahs, ascending by number.
    pub fn available_surahs(&self) -> &[Surah] {
        &self.surahs
    }

    /// Look up a surah by number.
    pub fn surah(&self, number: u32) -> Option<&Surah> {
        self.surahs
            .binary_search_by_key(&number, |s| s.number)
            .ok()
            .map(|idx| &self.surahs[idx])
    }

    /// One question per verse of the surah, in verse order.
    pub fn questions_for(&self, number: u32) -> Option<Vec<Question>> {
        self.surah(number)
            .map(|surah| surah.verses.iter().map(|v| Question::new(surah, v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Verse;
    use pretty_assertions::assert_eq;

    fn surah(number: u32) -> Surah {
        Surah {
            number,
            name: format!("Surah {number}"),
            name_arabic: "سورة".to_string(),
            verses: vec![Verse {
                number: 1,
                script_text: "نص".to_string(),
                transliteration: "nass".to_string(),
                translation: "text".to_string(),
            }],
        }
    }

    #[test]
    fn builtin_catalog_loads() {
        let catalog = SurahCatalog::builtin().unwrap();
        let numbers: Vec<u32> = catalog.available_surahs().iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![1, 93, 103, 108, 112, 113, 114]);
    }

    #[test]
    fn builtin_verse_counts() {
        let catalog = SurahCatalog::builtin().unwrap();
        let count = |n| catalog.surah(n).map(|s| s.verses.len());
        assert_eq!(count(1), Some(7));
        assert_eq!(count(93), Some(11));
        assert_eq!(count(112), Some(4));
        assert_eq!(count(114), Some(6));
    }

    #[test]
    fn surahs_sorted_regardless_of_input_order() {
        let catalog = SurahCatalog::from_surahs(vec![surah(114), surah(1), surah(93)]).unwrap();
        let numbers: Vec<u32> = catalog.available_surahs().iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![1, 93, 114]);
    }

    #[test]
    fn reject_duplicate_surah() {
        let result = SurahCatalog::from_surahs(vec![surah(2), surah(1), surah(2)]);
        assert_eq!(result.err(), Some(ParseError::DuplicateSurah { surah: 2 }));
    }

    #[test]
    fn reject_empty_catalog() {
        assert_eq!(
            SurahCatalog::from_surahs(Vec::new()).err(),
            Some(ParseError::EmptyFile)
        );
    }

    #[test]
    fn lookup_unknown_surah() {
        let catalog = SurahCatalog::builtin().unwrap();
        assert!(catalog.surah(2).is_none());
        assert!(catalog.questions_for(2).is_none());
    }

    #[test]
    fn questions_follow_verse_order() {
        let catalog = SurahCatalog::builtin().unwrap();
        let questions = catalog.questions_for(93).unwrap();
        assert_eq!(questions.len(), 11);
        assert!(questions.iter().all(|q| q.surah_number == 93 && q.surah_name == "Ad-Duha"));
        let numbers: Vec<u32> = questions.iter().map(|q| q.verse.number).collect();
        assert_eq!(numbers, (1..=11).collect::<Vec<_>>());
    }
}
