//! Parser for verse data files.
//!
//! # Format
//! ```text
//! # comments start with a hash
//! SURAH: 93 | Ad-Duha | الضحى
//! V: 1
//! AR: وَالضُّحَىٰ
//! TR: Wa ad-duha
//! EN: By the morning brightness
//! ```
//!
//! Unprefixed lines continue the previous field, joined with a space.
//! A blank line ends the field.

use crate::error::{ParseError, Result};
use crate::types::{Surah, Verse};
use std::collections::HashSet;

/// Parse verse data into surahs, in file order.
pub fn parse(content: &str) -> Result<Vec<Surah>> {
    let mut parser = Parser::new();

    for (idx, line) in content.lines().enumerate() {
        parser.process_line(line, idx + 1)?;
    }

    parser.finalize()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Script,
    Transliteration,
    Translation,
}

impl Field {
    fn name(self) -> &'static str {
        match self {
            Self::Script => "AR",
            Self::Transliteration => "TR",
            Self::Translation => "EN",
        }
    }
}

struct VerseBuilder {
    number: u32,
    script_text: Option<String>,
    transliteration: Option<String>,
    translation: Option<String>,
    start_line: usize,
}

impl VerseBuilder {
    fn new(number: u32, start_line: usize) -> Self {
        Self {
            number,
            script_text: None,
            transliteration: None,
            translation: None,
            start_line,
        }
    }

    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Script => &mut self.script_text,
            Field::Transliteration => &mut self.transliteration,
            Field::Translation => &mut self.translation,
        }
    }

    fn build(self) -> Result<Verse> {
        let line = self.start_line;
        let require = |value: Option<String>, field: Field| {
            value
                .filter(|v| !v.is_empty())
                .ok_or(ParseError::MissingField {
                    line,
                    field: field.name(),
                })
        };

        Ok(Verse {
            number: self.number,
            script_text: require(self.script_text, Field::Script)?,
            transliteration: require(self.transliteration, Field::Transliteration)?,
            translation: require(self.translation, Field::Translation)?,
        })
    }
}

struct SurahBuilder {
    number: u32,
    name: String,
    name_arabic: String,
    verses: Vec<Verse>,
    seen_verses: HashSet<u32>,
    start_line: usize,
}

impl SurahBuilder {
    fn build(mut self) -> Result<Surah> {
        if self.verses.is_empty() {
            return Err(ParseError::EmptySurah {
                surah: self.number,
                line: self.start_line,
            });
        }
        self.verses.sort_by_key(|v| v.number);

        Ok(Surah {
            number: self.number,
            name: self.name,
            name_arabic: self.name_arabic,
            verses: self.verses,
        })
    }
}

struct Parser {
    surahs: Vec<Surah>,
    surah: Option<SurahBuilder>,
    verse: Option<VerseBuilder>,
    current_field: Option<Field>,
}

impl Parser {
    fn new() -> Self {
        Self {
            surahs: Vec::new(),
            surah: None,
            verse: None,
            current_field: None,
        }
    }

    fn process_line(&mut self, line: &str, line_num: usize) -> Result<()> {
        match Self::parse_line(line) {
            LineType::Comment => {}
            LineType::Empty => self.current_field = None,
            LineType::Surah(header) => self.handle_surah(header, line_num)?,
            LineType::Verse(number) => self.handle_verse(number, line_num)?,
            LineType::Field(field, text) => self.handle_field(field, text, line_num)?,
            LineType::Text(text) => self.handle_continuation(text, line_num)?,
        }
        Ok(())
    }

    fn parse_line(line: &str) -> LineType<'_> {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            LineType::Empty
        } else if trimmed.starts_with('#') {
            LineType::Comment
        } else if let Some(rest) = trimmed.strip_prefix("SURAH:") {
            LineType::Surah(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("V:") {
            LineType::Verse(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("AR:") {
            LineType::Field(Field::Script, rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("TR:") {
            LineType::Field(Field::Transliteration, rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("EN:") {
            LineType::Field(Field::Translation, rest.trim())
        } else {
            LineType::Text(trimmed)
        }
    }

    fn handle_surah(&mut self, header: &str, line_num: usize) -> Result<()> {
        self.finish_surah()?;

        let invalid = || ParseError::InvalidSurahHeader {
            line: line_num,
            value: header.to_string(),
        };

        let parts: Vec<&str> = header.split('|').map(str::trim).collect();
        let [number, name, name_arabic] = parts.as_slice() else {
            return Err(invalid());
        };
        let number = number.parse::<u32>().map_err(|_| invalid())?;
        if number == 0 || name.is_empty() {
            return Err(invalid());
        }

        self.surah = Some(SurahBuilder {
            number,
            name: name.to_string(),
            name_arabic: name_arabic.to_string(),
            verses: Vec::new(),
            seen_verses: HashSet::new(),
            start_line: line_num,
        });
        Ok(())
    }

    fn handle_verse(&mut self, number: &str, line_num: usize) -> Result<()> {
        self.finish_verse()?;

        if self.surah.is_none() {
            return Err(ParseError::MissingSurah { line: line_num });
        }

        let number = number
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| ParseError::InvalidVerseNumber {
                line: line_num,
                value: number.to_string(),
            })?;

        self.verse = Some(VerseBuilder::new(number, line_num));
        Ok(())
    }

    fn handle_field(&mut self, field: Field, text: &str, line_num: usize) -> Result<()> {
        let verse = self
            .verse
            .as_mut()
            .ok_or(ParseError::OrphanField { line: line_num })?;

        *verse.slot(field) = Some(text.to_string());
        self.current_field = Some(field);
        Ok(())
    }

    fn handle_continuation(&mut self, text: &str, line_num: usize) -> Result<()> {
        let (Some(verse), Some(field)) = (self.verse.as_mut(), self.current_field) else {
            return Err(ParseError::OrphanField { line: line_num });
        };

        let slot = verse.slot(field);
        let joined = match slot.take() {
            Some(existing) if !existing.is_empty() => format!("{existing} {text}"),
            _ => text.to_string(),
        };
        *slot = Some(joined);
        Ok(())
    }

    fn finish_verse(&mut self) -> Result<()> {
        self.current_field = None;

        let Some(builder) = self.verse.take() else {
            return Ok(());
        };
        let line = builder.start_line;
        let verse = builder.build()?;

        // A verse only exists once a surah header has been seen.
        let Some(surah) = self.surah.as_mut() else {
            return Err(ParseError::MissingSurah { line });
        };
        if !surah.seen_verses.insert(verse.number) {
            return Err(ParseError::DuplicateVerse {
                surah: surah.number,
                verse: verse.number,
                line,
            });
        }
        surah.verses.push(verse);
        Ok(())
    }

    fn finish_surah(&mut self) -> Result<()> {
        self.finish_verse()?;

        if let Some(builder) = self.surah.take() {
            self.surahs.push(builder.build()?);
        }
        Ok(())
    }

    fn finalize(mut self) -> Result<Vec<Surah>> {
        self.finish_surah()?;

        if self.surahs.is_empty() {
            return Err(ParseError::EmptyFile);
        }
        Ok(self.surahs)
    }
}

enum LineType<'a> {
    Surah(&'a str),
    Verse(&'a str),
    Field(Field, &'a str),
    Text(&'a str),
    Comment,
    Empty,
}
