//! Core library for the verse memorization quiz.
//!
//! Provides:
//! - Answer evaluation for typed recall (script and transliteration matching)
//! - Stable option ids derived from option content
//! - Verse data parser and the surah catalog
//! - Challenges for each game mode and the session state machine

pub mod catalog;
pub mod challenge;
pub mod error;
pub mod matching;
pub mod option_id;
pub mod parser;
pub mod session;
pub mod types;

pub use catalog::SurahCatalog;
pub use challenge::{Answer, Challenge, MIN_OPTION_COUNT};
pub use error::{ParseError, Result, SessionError};
pub use matching::{
    character_presence_similarity, check_answer, evaluate_answer, evaluate_with_settings,
    normalize_transliteration, strip_diacritics, MatchResult, MatchStrategy,
};
pub use option_id::{generate_arabic_trans_option_id, generate_option_id, generate_option_ids};
pub use parser::parse;
pub use session::{transition, try_transition, AnswerRecord, GameEvent, GameState, Session, SessionSummary};
pub use types::{Choice, GameMode, Question, QuizSettings, Surah, Verse};
