//! Quiz session state machine.
//!
//! `transition` is the pure state function; `Session` wraps it with the
//! question list, current challenge and answer history.

use crate::catalog::SurahCatalog;
use crate::challenge::{Answer, Challenge};
use crate::error::SessionError;
use crate::types::{GameMode, Question, QuizSettings, Verse};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Where the learner is in a play-through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GameState {
    SelectingSurah,
    SelectingMode {
        surah: u32,
    },
    InSession {
        surah: u32,
        mode: GameMode,
        index: usize,
        total: usize,
        score: usize,
    },
    Complete {
        surah: u32,
        mode: GameMode,
        score: usize,
        total: usize,
    },
}

impl Default for GameState {
    fn default() -> Self {
        Self::SelectingSurah
    }
}

impl GameState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectingSurah => "selecting surah",
            Self::SelectingMode { .. } => "selecting mode",
            Self::InSession { .. } => "in session",
            Self::Complete { .. } => "complete",
        }
    }
}

/// Inputs to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    SelectSurah(u32),
    SelectMode {
        mode: GameMode,
        question_count: usize,
    },
    Answered {
        correct: bool,
    },
    BackToModes,
    BackToSurahs,
    Restart,
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectSurah(_) => "select surah",
            Self::SelectMode { .. } => "select mode",
            Self::Answered { .. } => "answer",
            Self::BackToModes => "go back to modes",
            Self::BackToSurahs => "go back to surahs",
            Self::Restart => "restart",
        }
    }
}

/// Next state for `event`, or `None` when the event does not apply.
pub fn try_transition(state: &GameState, event: GameEvent) -> Option<GameState> {
    use GameState::*;

    match (state, event) {
        (SelectingSurah, GameEvent::SelectSurah(surah)) => Some(SelectingMode { surah }),
        (SelectingMode { .. }, GameEvent::BackToSurahs)
        | (Complete { .. }, GameEvent::BackToSurahs) => Some(SelectingSurah),
        (
            SelectingMode { surah },
            GameEvent::SelectMode {
                mode,
                question_count,
            },
        ) if question_count > 0 => Some(InSession {
            surah: *surah,
            mode,
            index: 0,
            total: question_count,
            score: 0,
        }),
        (
            InSession {
                surah,
                mode,
                index,
                total,
                score,
            },
            GameEvent::Answered { correct },
        ) => {
            let index = index + 1;
            let score = score + usize::from(correct);
            if index >= *total {
                Some(Complete {
                    surah: *surah,
                    mode: *mode,
                    score,
                    total: *total,
                })
            } else {
                Some(InSession {
                    surah: *surah,
                    mode: *mode,
                    index,
                    total: *total,
                    score,
                })
            }
        }
        (InSession { surah, .. }, GameEvent::BackToModes)
        | (Complete { surah, .. }, GameEvent::Restart) => Some(SelectingMode { surah: *surah }),
        _ => None,
    }
}

/// Apply `event`; events that do not apply leave the state unchanged.
pub fn transition(state: &GameState, event: GameEvent) -> GameState {
    try_transition(state, event).unwrap_or_else(|| state.clone())
}

/// Outcome of one submitted answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub verse_number: u32,
    pub correct: bool,
    pub answer: Answer,
    pub expected: Verse,
}

/// Final score of a completed session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub surah_number: u32,
    pub surah_name: String,
    pub mode: GameMode,
    pub correct: usize,
    pub total: usize,
    pub percentage: f64,
}

/// One learner working through the catalog.
pub struct Session<R> {
    catalog: SurahCatalog,
    settings: QuizSettings,
    rng: R,
    state: GameState,
    questions: Vec<Question>,
    challenge: Option<Challenge>,
    history: Vec<AnswerRecord>,
}

impl<R: Rng> Session<R> {
    pub fn new(catalog: SurahCatalog, settings: QuizSettings, rng: R) -> Self {
        Self {
            catalog,
            settings,
            rng,
            state: GameState::default(),
            questions: Vec::new(),
            challenge: None,
            history: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &SurahCatalog {
        &self.catalog
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The shuffled questions of the current session.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn history(&self) -> &[AnswerRecord] {
        &self.history
    }

    /// The question being asked, if a session is running.
    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            GameState::InSession { index, .. } => self.questions.get(index),
            _ => None,
        }
    }

    pub fn current_challenge(&self) -> Option<&Challenge> {
        self.challenge.as_ref()
    }

    fn apply(&mut self, event: GameEvent) -> Result<(), SessionError> {
        let next = try_transition(&self.state, event).ok_or(SessionError::InvalidEvent {
            event: event.name(),
            state: self.state.name(),
        })?;
        tracing::debug!(from = self.state.name(), to = next.name(), event = event.name(), "session transition");
        self.state = next;
        Ok(())
    }

    pub fn select_surah(&mut self, number: u32) -> Result<(), SessionError> {
        if self.catalog.surah(number).is_none() {
            return Err(SessionError::UnknownSurah(number));
        }
        self.apply(GameEvent::SelectSurah(number))
    }

    /// Start a session in `mode`, shuffling the surah's questions afresh.
    pub fn select_mode(&mut self, mode: GameMode) -> Result<&Challenge, SessionError> {
        let GameState::SelectingMode { surah } = self.state else {
            return Err(SessionError::InvalidEvent {
                event: "select mode",
                state: self.state.name(),
            });
        };

        let mut questions = self
            .catalog
            .questions_for(surah)
            .ok_or(SessionError::UnknownSurah(surah))?;
        if questions.is_empty() {
            return Err(SessionError::NoQuestions(surah));
        }
        questions.shuffle(&mut self.rng);

        self.apply(GameEvent::SelectMode {
            mode,
            question_count: questions.len(),
        })?;
        self.questions = questions;
        self.history.clear();
        self.prepare_challenge();

        self.challenge.as_ref().ok_or(SessionError::NoQuestions(surah))
    }

    /// Judge `answer` against the current question and advance.
    pub fn submit(&mut self, answer: Answer) -> Result<&AnswerRecord, SessionError> {
        let (Some(question), Some(challenge)) = (self.current_question(), self.challenge.as_ref())
        else {
            return Err(SessionError::NotInSession);
        };

        let correct = challenge.judge(&answer)?;
        let record = AnswerRecord {
            verse_number: question.verse.number,
            correct,
            answer,
            expected: question.verse.clone(),
        };

        self.apply(GameEvent::Answered { correct })?;
        self.history.push(record);
        self.prepare_challenge();

        self.history.last().ok_or(SessionError::NotInSession)
    }

    /// Abandon the running session; its score is discarded.
    pub fn back_to_modes(&mut self) -> Result<(), SessionError> {
        self.apply(GameEvent::BackToModes)?;
        self.reset_round();
        Ok(())
    }

    pub fn back_to_surahs(&mut self) -> Result<(), SessionError> {
        self.apply(GameEvent::BackToSurahs)?;
        self.reset_round();
        Ok(())
    }

    /// Leave a completed session for mode selection on the same surah.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.apply(GameEvent::Restart)?;
        self.reset_round();
        Ok(())
    }

    /// Score of the completed session.
    pub fn summary(&self) -> Option<SessionSummary> {
        let GameState::Complete {
            surah,
            mode,
            score,
            total,
        } = self.state
        else {
            return None;
        };

        let surah_name = self
            .catalog
            .surah(surah)
            .map(|s| s.name.clone())
            .unwrap_or_default();
        let percentage = if total == 0 {
            0.0
        } else {
            score as f64 * 100.0 / total as f64
        };

        Some(SessionSummary {
            surah_number: surah,
            surah_name,
            mode,
            correct: score,
            total,
            percentage,
        })
    }

    fn prepare_challenge(&mut self) {
        self.challenge = match self.state {
            GameState::InSession { mode, index, .. } => self.questions.get(index).map(|question| {
                Challenge::build(
                    question,
                    &self.questions,
                    mode,
                    self.settings.option_count,
                    &mut self.rng,
                )
            }),
            _ => None,
        };
    }

    fn reset_round(&mut self) {
        self.questions.clear();
        self.challenge = None;
        self.history.clear();
    }
}
