//! Line-oriented game loop over any reader and writer.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::str::FromStr;
use tictac_core::{GameSession, Mode, PlayReport, Position};
use tracing::{debug, info, instrument};

/// Words the loop understands besides positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
enum Keyword {
    #[strum(serialize = "quit", serialize = "q", serialize = "exit")]
    Quit,
    Restart,
    Mode,
    Hint,
    #[strum(serialize = "help", serialize = "?")]
    Help,
}

/// One parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Quit,
    Restart,
    SetMode(Mode),
    Hint,
    Help,
    Play(Position),
}

impl FromStr for Input {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let first = words.next().ok_or_else(|| "empty input".to_string())?;

        if let Ok(keyword) = first.parse::<Keyword>() {
            return Ok(match keyword {
                Keyword::Quit => Input::Quit,
                Keyword::Restart => Input::Restart,
                Keyword::Hint => Input::Hint,
                Keyword::Help => Input::Help,
                Keyword::Mode => {
                    let mode = words
                        .next()
                        .ok_or_else(|| "usage: mode manual|automated".to_string())?;
                    Input::SetMode(
                        mode.parse()
                            .map_err(|_| format!("unknown mode {:?}", mode))?,
                    )
                }
            });
        }

        Position::from_input(line)
            .map(Input::Play)
            .ok_or_else(|| format!("not a position or command: {:?}", line.trim()))
    }
}

const HELP: &str = "Enter 1-9 (or a label like `center`) to play.\n\
Commands: restart, mode manual|automated, hint, help, quit";

/// Drives `session` from `input` until EOF or `quit`, writing to `out`.
#[instrument(skip_all, fields(mode = %session.mode(), json))]
pub fn run<R: BufRead, W: Write>(
    session: &mut GameSession,
    input: R,
    mut out: W,
    json: bool,
) -> Result<()> {
    if !json {
        writeln!(out, "{}\n", HELP)?;
        render(session, &mut out)?;
    }

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let parsed = match line.parse::<Input>() {
            Ok(parsed) => parsed,
            Err(message) => {
                write_error(&mut out, &message, json)?;
                continue;
            }
        };
        debug!(?parsed, "Input");

        let result = match parsed {
            Input::Quit => break,
            Input::Help => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            Input::Restart => {
                session.restart();
                None
            }
            Input::SetMode(mode) => {
                session.set_mode(mode);
                None
            }
            Input::Hint => Some(session.auto_move()),
            Input::Play(position) => Some(session.play_at(position.to_index())),
        };

        match result {
            Some(Err(e)) => write_error(&mut out, &e.to_string(), json)?,
            Some(Ok(report)) if json => write_report(&report, &mut out)?,
            _ if json => {
                let state = serde_json::json!({
                    "mode": session.mode(),
                    "board": session.board(),
                    "turn": session.turn(),
                });
                writeln!(out, "{}", state)?;
            }
            Some(Ok(report)) => {
                for mv in report.moves().iter().filter(|mv| mv.is_automated()) {
                    writeln!(out, "{} plays {}", session.player_name(mv.player), mv)?;
                }
                render(session, &mut out)?;
            }
            None => render(session, &mut out)?,
        }
    }

    info!(moves = session.history().len(), "Leaving game loop");
    out.flush()?;
    Ok(())
}

fn render<W: Write>(session: &GameSession, out: &mut W) -> Result<()> {
    writeln!(out, "{}", session.board().display())?;
    match session.status_message() {
        Some(message) => writeln!(out, "{}  (type `restart` to play again)\n", message)?,
        None => writeln!(out, "{} to move\n", session.player_name(session.turn()))?,
    }
    Ok(())
}

fn write_report<W: Write>(report: &PlayReport, out: &mut W) -> Result<()> {
    let line = serde_json::to_string(report).context("Failed to encode report")?;
    writeln!(out, "{}", line)?;
    Ok(())
}

fn write_error<W: Write>(out: &mut W, message: &str, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::json!({ "error": message }))?;
    } else {
        writeln!(out, "Error: {}", message)?;
    }
    Ok(())
}
