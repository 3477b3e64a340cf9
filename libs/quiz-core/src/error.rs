//! Error types for quiz-core.

use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while parsing verse data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("verse outside of a surah at line {line}")]
    MissingSurah { line: usize },

    #[error("invalid surah header at line {line}: {value}")]
    InvalidSurahHeader { line: usize, value: String },

    #[error("invalid verse number at line {line}: {value}")]
    InvalidVerseNumber { line: usize, value: String },

    #[error("verse starting at line {line} is missing its {field} line")]
    MissingField { line: usize, field: &'static str },

    #[error("field at line {line} does not belong to a verse")]
    OrphanField { line: usize },

    #[error("duplicate verse {verse} in surah {surah} at line {line}")]
    DuplicateVerse { surah: u32, verse: u32, line: usize },

    #[error("surah {surah} declared at line {line} has no verses")]
    EmptySurah { surah: u32, line: usize },

    #[error("duplicate surah {surah}")]
    DuplicateSurah { surah: u32 },

    #[error("empty file")]
    EmptyFile,
}

/// Errors raised by invalid operations on a quiz session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown surah {0}")]
    UnknownSurah(u32),

    #[error("surah {0} has no questions")]
    NoQuestions(u32),

    #[error("cannot {event} while {state}")]
    InvalidEvent {
        event: &'static str,
        state: &'static str,
    },

    #[error("session is not accepting answers")]
    NotInSession,

    #[error("answer does not fit a {0} question")]
    AnswerMismatch(&'static str),
}
