//! Line-oriented terminal front end for a quiz session.
//!
//! Commands start with `:` so they never collide with typed answers:
//! `:q` quits, `:b` goes back one screen, `:r` restarts a finished session.

use anyhow::Result;
use quiz_core::{Answer, Challenge, GameMode, GameState, Session, SessionError};
use rand::Rng;
use std::io::{BufRead, Write};

/// What the learner asked for on a line of input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Quit,
    Back,
    Restart,
    Line(String),
}

/// Drive `session` until the learner quits or input ends.
pub fn play<R, I, O>(session: &mut Session<R>, mut input: I, mut output: O, json: bool) -> Result<()>
where
    R: Rng,
    I: BufRead,
    O: Write,
{
    loop {
        match session.state().clone() {
            GameState::SelectingSurah => render_surahs(session, &mut output)?,
            GameState::SelectingMode { surah } => render_modes(session, surah, &mut output)?,
            GameState::InSession { index, total, .. } => {
                if let Some(challenge) = session.current_challenge() {
                    writeln!(output, "\n[{}/{}]", index + 1, total)?;
                    render_challenge(challenge, &mut output)?;
                }
            }
            GameState::Complete { .. } => {
                render_summary(session, json, &mut output)?;
                writeln!(output, ":r to play again, :b for surahs, :q to quit")?;
            }
        }
        write!(output, "> ")?;
        output.flush()?;

        let Some(line) = read_input(&mut input)? else {
            return Ok(());
        };

        let result = match line {
            Input::Quit => return Ok(()),
            Input::Back => go_back(session),
            Input::Restart => session.restart(),
            Input::Line(text) => handle_line(session, &text, &mut output)?,
        };
        if let Err(err) = result {
            tracing::debug!(error = %err, "rejected input");
            writeln!(output, "{err}")?;
        }
    }
}

fn read_input<I: BufRead>(input: &mut I) -> Result<Option<Input>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let parsed = match line.trim() {
        ":q" => Input::Quit,
        ":b" => Input::Back,
        ":r" => Input::Restart,
        _ => Input::Line(line.trim_end_matches(['\r', '\n']).to_string()),
    };
    Ok(Some(parsed))
}

fn go_back<R: Rng>(session: &mut Session<R>) -> std::result::Result<(), SessionError> {
    match session.state() {
        GameState::InSession { .. } => session.back_to_modes(),
        _ => session.back_to_surahs(),
    }
}

/// Apply a non-command line to the current screen.
fn handle_line<R: Rng, O: Write>(
    session: &mut Session<R>,
    text: &str,
    output: &mut O,
) -> Result<std::result::Result<(), SessionError>> {
    let outcome = match session.state().clone() {
        GameState::SelectingSurah => match text.trim().parse::<u32>() {
            Ok(number) => session.select_surah(number),
            Err(_) => {
                writeln!(output, "Enter a surah number.")?;
                Ok(())
            }
        },
        GameState::SelectingMode { .. } => match pick(text, GameMode::ALL.len()) {
            Some(idx) => session.select_mode(GameMode::ALL[idx]).map(|_| ()),
            None => {
                writeln!(output, "Pick a mode from the list.")?;
                Ok(())
            }
        },
        GameState::InSession { .. } => {
            let Some(answer) = session.current_challenge().and_then(|c| parse_answer(c, text))
            else {
                writeln!(output, "That is not a valid answer here.")?;
                return Ok(Ok(()));
            };
            match session.submit(answer) {
                Ok(record) => {
                    if record.correct {
                        writeln!(output, "Correct!")?;
                    } else {
                        writeln!(
                            output,
                            "Not quite. {} ({})",
                            record.expected.script_text, record.expected.transliteration
                        )?;
                    }
                    Ok(())
                }
                Err(err) => Err(err),
            }
        }
        GameState::Complete { .. } => {
            writeln!(output, "Session finished.")?;
            Ok(())
        }
    };
    Ok(outcome)
}

/// Parse a 1-based list position.
fn pick(text: &str, len: usize) -> Option<usize> {
    text.trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1)
}

/// Turn a line into an answer for `challenge`.
fn parse_answer(challenge: &Challenge, text: &str) -> Option<Answer> {
    match challenge {
        Challenge::MultipleChoice { choices, .. } => {
            pick(text, choices.len()).map(|idx| Answer::Choice(choices[idx].id.clone()))
        }
        Challenge::FreeText { .. } => Some(Answer::Text(text.to_string())),
        Challenge::Ordering { pieces, .. } => text
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(|s| pick(s, pieces.len()).map(|idx| pieces[idx].id.clone()))
            .collect::<Option<Vec<_>>>()
            .filter(|ids| !ids.is_empty())
            .map(Answer::Order),
    }
}

fn render_surahs<R: Rng, O: Write>(session: &Session<R>, output: &mut O) -> Result<()> {
    writeln!(output, "\nChoose a surah:")?;
    for surah in session.catalog().available_surahs() {
        writeln!(
            output,
            "  {:>3}. {} ({}) - {} verses",
            surah.number,
            surah.name,
            surah.name_arabic,
            surah.verses.len()
        )?;
    }
    Ok(())
}

fn render_modes<R: Rng, O: Write>(session: &Session<R>, surah: u32, output: &mut O) -> Result<()> {
    let name = session
        .catalog()
        .surah(surah)
        .map(|s| s.name.as_str())
        .unwrap_or_default();
    writeln!(output, "\n{name}: choose a mode (:b for surahs)")?;
    for (idx, mode) in GameMode::ALL.iter().enumerate() {
        writeln!(output, "  {}. {}", idx + 1, mode_label(*mode))?;
    }
    Ok(())
}

fn mode_label(mode: GameMode) -> &'static str {
    match mode {
        GameMode::Translation => "Match the translation",
        GameMode::MissingWord => "Find the missing word",
        GameMode::TypedRecall => "Type the verse",
        GameMode::Ordering => "Order the words",
    }
}

fn render_challenge<O: Write>(challenge: &Challenge, output: &mut O) -> Result<()> {
    writeln!(output, "{}", challenge.prompt())?;
    match challenge {
        Challenge::MultipleChoice { choices, .. } => {
            for (idx, choice) in choices.iter().enumerate() {
                match &choice.detail {
                    Some(detail) => writeln!(output, "  {}) {} ({})", idx + 1, choice.text, detail)?,
                    None => writeln!(output, "  {}) {}", idx + 1, choice.text)?,
                }
            }
        }
        Challenge::FreeText { .. } => {
            writeln!(output, "Type the verse in Arabic or transliteration:")?;
        }
        Challenge::Ordering { pieces, .. } => {
            for (idx, piece) in pieces.iter().enumerate() {
                writeln!(output, "  {}) {}", idx + 1, piece.text)?;
            }
            writeln!(output, "Enter the numbers in order, e.g. 2 1 3:")?;
        }
    }
    Ok(())
}

fn render_summary<R: Rng, O: Write>(session: &Session<R>, json: bool, output: &mut O) -> Result<()> {
    let Some(summary) = session.summary() else {
        return Ok(());
    };

    tracing::info!(
        surah = summary.surah_number,
        mode = %summary.mode,
        correct = summary.correct,
        total = summary.total,
        "session complete"
    );

    if json {
        writeln!(output, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else {
        writeln!(
            output,
            "\n{} ({}): {}/{} correct ({:.0}%)",
            summary.surah_name,
            mode_label(summary.mode),
            summary.correct,
            summary.total,
            summary.percentage
        )?;
    }
    Ok(())
}
