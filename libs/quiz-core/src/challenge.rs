//! Presenting a question in a game mode and judging the answer.

use crate::error::SessionError;
use crate::matching::{check_answer, strip_diacritics};
use crate::option_id::{generate_arabic_trans_option_id, generate_option_id};
use crate::types::{Choice, GameMode, Question};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Placeholder shown in place of the missing word.
pub const BLANK: &str = "____";

/// Fewest choices a multiple-choice challenge asks for.
pub const MIN_OPTION_COUNT: usize = 2;

const MISSING_WORD_PREFIX: &str = "mw";
const ORDERING_PREFIX: &str = "ord";

/// A question as presented to the learner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Challenge {
    /// Pick one of `choices`.
    MultipleChoice {
        prompt: String,
        choices: Vec<Choice>,
        correct_id: String,
    },
    /// Type the verse.
    FreeText {
        prompt: String,
        script_text: String,
        transliteration: String,
    },
    /// Arrange `pieces` so their ids read `correct_order`.
    Ordering {
        prompt: String,
        pieces: Vec<Choice>,
        correct_order: Vec<String>,
    },
}

/// A learner's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Choice(String),
    Text(String),
    Order(Vec<String>),
}

impl Challenge {
    /// Build the challenge for `question` in `mode`.
    ///
    /// `pool` supplies distractors, normally every question of the session.
    /// Multiple-choice challenges offer at most `option_count` choices, which
    /// is raised to [`MIN_OPTION_COUNT`] when lower.
    pub fn build<R: Rng + ?Sized>(
        question: &Question,
        pool: &[Question],
        mode: GameMode,
        option_count: usize,
        rng: &mut R,
    ) -> Self {
        let option_count = option_count.max(MIN_OPTION_COUNT);
        match mode {
            GameMode::Translation => translation_challenge(question, pool, option_count, rng),
            GameMode::MissingWord => missing_word_challenge(question, pool, option_count, rng),
            GameMode::TypedRecall => Self::FreeText {
                prompt: question.verse.translation.clone(),
                script_text: question.verse.script_text.clone(),
                transliteration: question.verse.transliteration.clone(),
            },
            GameMode::Ordering => ordering_challenge(question, rng),
        }
    }

    pub fn prompt(&self) -> &str {
        match self {
            Self::MultipleChoice { prompt, .. }
            | Self::FreeText { prompt, .. }
            | Self::Ordering { prompt, .. } => prompt,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::MultipleChoice { .. } => "multiple choice",
            Self::FreeText { .. } => "free text",
            Self::Ordering { .. } => "ordering",
        }
    }

    /// Judge an answer. Fails only when the answer has the wrong shape.
    pub fn judge(&self, answer: &Answer) -> Result<bool, SessionError> {
        match (self, answer) {
            (Self::MultipleChoice { correct_id, .. }, Answer::Choice(id)) => Ok(id == correct_id),
            (
                Self::FreeText {
                    script_text,
                    transliteration,
                    ..
                },
                Answer::Text(text),
            ) => Ok(check_answer(text, script_text, transliteration)),
            (
                Self::Ordering {
                    pieces,
                    correct_order,
                    ..
                },
                Answer::Order(ids),
            ) => {
                // Compare by text so repeated words may be placed in either slot.
                let text_of = |id: &String| {
                    pieces
                        .iter()
                        .find(|p| &p.id == id)
                        .map(|p| p.text.as_str())
                };
                // Each piece must be placed exactly once.
                let distinct: HashSet<&String> = ids.iter().collect();
                if ids.len() != pieces.len() || distinct.len() != pieces.len() {
                    return Ok(false);
                }
                let given: Option<Vec<&str>> = ids.iter().map(text_of).collect();
                let expected: Option<Vec<&str>> = correct_order.iter().map(text_of).collect();
                Ok(given.is_some() && given == expected)
            }
            _ => Err(SessionError::AnswerMismatch(self.kind())),
        }
    }
}

/// Prompt with the translation; choose the verse as a script/transliteration pair.
fn translation_challenge<R: Rng + ?Sized>(
    question: &Question,
    pool: &[Question],
    option_count: usize,
    rng: &mut R,
) -> Challenge {
    let verse = &question.verse;
    let mut seen = HashSet::from([strip_diacritics(&verse.script_text)]);
    let mut candidates: Vec<(&str, &str)> = pool
        .iter()
        .map(|q| (q.verse.script_text.as_str(), q.verse.transliteration.as_str()))
        .collect();
    candidates.sort_unstable();
    candidates.retain(|(script, _)| seen.insert(strip_diacritics(script)));
    candidates.shuffle(rng);
    candidates.truncate(option_count.saturating_sub(1));
    candidates.insert(0, (verse.script_text.as_str(), verse.transliteration.as_str()));

    // Ids are assigned before shuffling so each choice keeps its key.
    let mut choices: Vec<Choice> = candidates
        .iter()
        .enumerate()
        .map(|(index, (script, translit))| Choice {
            id: generate_arabic_trans_option_id(script, translit, index),
            text: script.to_string(),
            detail: Some(translit.to_string()),
        })
        .collect();
    let correct_id = choices[0].id.clone();
    choices.shuffle(rng);

    Challenge::MultipleChoice {
        prompt: verse.translation.clone(),
        choices,
        correct_id,
    }
}

/// Blank one word of the script text; choose the missing word.
fn missing_word_challenge<R: Rng + ?Sized>(
    question: &Question,
    pool: &[Question],
    option_count: usize,
    rng: &mut R,
) -> Challenge {
    let mut words: Vec<&str> = question.verse.script_text.split_whitespace().collect();
    if words.is_empty() {
        words.push(question.verse.script_text.as_str());
    }
    let missing_idx = rng.gen_range(0..words.len());
    let missing = words[missing_idx];

    // Distractors must not read as the answer once vowel marks are dropped.
    let mut seen = HashSet::from([strip_diacritics(missing)]);
    let mut distractors: Vec<&str> = pool
        .iter()
        .flat_map(|q| q.verse.script_text.split_whitespace())
        .collect();
    distractors.sort_unstable();
    distractors.retain(|w| seen.insert(strip_diacritics(w)));
    distractors.shuffle(rng);
    distractors.truncate(option_count.saturating_sub(1));

    let mut choices: Vec<Choice> = std::iter::once(missing)
        .chain(distractors)
        .enumerate()
        .map(|(index, word)| Choice {
            id: generate_option_id(word, index, Some(MISSING_WORD_PREFIX)),
            text: word.to_string(),
            detail: None,
        })
        .collect();
    let correct_id = choices[0].id.clone();
    choices.shuffle(rng);

    words[missing_idx] = BLANK;
    Challenge::MultipleChoice {
        prompt: words.join(" "),
        choices,
        correct_id,
    }
}

/// Shuffle the words of the script text; restore their order.
fn ordering_challenge<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> Challenge {
    let pieces: Vec<Choice> = question
        .verse
        .script_text
        .split_whitespace()
        .enumerate()
        .map(|(position, word)| Choice {
            id: generate_option_id(word, position, Some(ORDERING_PREFIX)),
            text: word.to_string(),
            detail: None,
        })
        .collect();
    let correct_order = pieces.iter().map(|p| p.id.clone()).collect();

    let mut shuffled = pieces;
    shuffled.shuffle(rng);

    Challenge::Ordering {
        prompt: question.verse.translation.clone(),
        pieces: shuffled,
        correct_order,
    }
}
