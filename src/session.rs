//! Session scripts
//!
//! A session is a list of render-surface events replayed against a fresh
//! board, one per line:
//!
//! ```text
//! # create a project and finish it
//! submit title="Write the report" description="Quarterly numbers" people=5
//! drag-start PRJ-1 active
//! drag-over finished
//! drop finished
//! drag-end
//! show
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Values containing
//! spaces go in double quotes; `\"` and `\\` escape inside quotes.

use thiserror::Error;

use crate::board::{Board, SubmitOutcome};
use crate::core::ports::RenderSurface;
use crate::core::services::{FieldInput, Transition};

/// Errors that can occur when parsing a session script
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A quoted value was not closed
    #[error("line {line}: unterminated quote")]
    UnterminatedQuote {
        /// 1-based line number
        line: usize,
    },

    /// First word is not a known command
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand {
        /// 1-based line number
        line: usize,
        /// Command as written
        command: String,
    },

    /// Command is missing an argument
    #[error("line {line}: `{command}` needs <{argument}>")]
    MissingArgument {
        /// 1-based line number
        line: usize,
        /// Command name
        command: &'static str,
        /// Missing argument name
        argument: &'static str,
    },

    /// Command got more arguments than it takes
    #[error("line {line}: `{command}` does not take `{argument}`")]
    UnexpectedArgument {
        /// 1-based line number
        line: usize,
        /// Command name
        command: &'static str,
        /// Extra argument
        argument: String,
    },

    /// Submit argument is not `key=value`
    #[error("line {line}: expected key=value, got `{token}`")]
    MalformedField {
        /// 1-based line number
        line: usize,
        /// Offending token
        token: String,
    },
}

/// One render-surface event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Form submission
    Submit(FieldInput),
    /// Pointer down on a card
    Arm {
        /// Project ID
        id: String,
        /// Column the card is in
        origin: String,
    },
    /// Drag started
    DragStart {
        /// Project ID
        id: String,
        /// Column the card is in
        origin: String,
    },
    /// Drag over a column
    DragOver(String),
    /// Drag left a column
    DragLeave(String),
    /// Drop on a column
    Drop(String),
    /// Drag ended
    DragEnd,
    /// Re-render the board
    Show,
}

/// Result of applying one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// A submission was evaluated
    Submitted(SubmitOutcome),
    /// The drag protocol moved
    Drag(Transition),
    /// The board was re-rendered
    Shown,
}

/// Parse a whole script
pub fn parse_script(script: &str) -> Result<Vec<SessionEvent>, SessionError> {
    let mut events = Vec::new();
    for (index, line) in script.lines().enumerate() {
        if let Some(event) = parse_line(line, index + 1)? {
            events.push(event);
        }
    }
    Ok(events)
}

/// Parse one line; `None` for blank lines and comments
pub fn parse_line(line: &str, number: usize) -> Result<Option<SessionEvent>, SessionError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let words = split_words(trimmed).ok_or(SessionError::UnterminatedQuote { line: number })?;
    let Some((command, args)) = words.split_first() else {
        return Ok(None);
    };

    let event = match command.to_lowercase().replace('_', "-").as_str() {
        "submit" => SessionEvent::Submit(parse_fields(args, number)?),
        "arm" => {
            let [id, origin] = take_args(args, number, "arm", ["id", "origin"])?;
            SessionEvent::Arm { id, origin }
        },
        "drag-start" => {
            let [id, origin] = take_args(args, number, "drag-start", ["id", "origin"])?;
            SessionEvent::DragStart { id, origin }
        },
        "drag-over" => {
            let [target] = take_args(args, number, "drag-over", ["target"])?;
            SessionEvent::DragOver(target)
        },
        "drag-leave" => {
            let [target] = take_args(args, number, "drag-leave", ["target"])?;
            SessionEvent::DragLeave(target)
        },
        "drop" => {
            let [target] = take_args(args, number, "drop", ["target"])?;
            SessionEvent::Drop(target)
        },
        "drag-end" => {
            take_args(args, number, "drag-end", [])?;
            SessionEvent::DragEnd
        },
        "show" => {
            take_args(args, number, "show", [])?;
            SessionEvent::Show
        },
        _ => {
            return Err(SessionError::UnknownCommand {
                line: number,
                command: command.clone(),
            });
        },
    };
    Ok(Some(event))
}

/// Apply one event to a board
pub fn apply<S: RenderSurface>(board: &mut Board<S>, event: &SessionEvent) -> EventOutcome {
    match event {
        SessionEvent::Submit(input) => EventOutcome::Submitted(board.submit_form(input)),
        SessionEvent::Arm { id, origin } => EventOutcome::Drag(board.arm(id, origin)),
        SessionEvent::DragStart { id, origin } => EventOutcome::Drag(board.drag_start(id, origin)),
        SessionEvent::DragOver(target) => EventOutcome::Drag(board.drag_over(target)),
        SessionEvent::DragLeave(target) => EventOutcome::Drag(board.drag_leave(target)),
        SessionEvent::Drop(target) => EventOutcome::Drag(board.drop(target)),
        SessionEvent::DragEnd => EventOutcome::Drag(board.drag_end()),
        SessionEvent::Show => {
            board.refresh();
            EventOutcome::Shown
        },
    }
}

fn take_args<const N: usize>(
    args: &[String],
    line: usize,
    command: &'static str,
    names: [&'static str; N],
) -> Result<[String; N], SessionError> {
    if let Some(extra) = args.get(N) {
        return Err(SessionError::UnexpectedArgument {
            line,
            command,
            argument: extra.clone(),
        });
    }
    if args.len() < N {
        return Err(SessionError::MissingArgument {
            line,
            command,
            argument: names[args.len()],
        });
    }
    Ok(std::array::from_fn(|i| args[i].clone()))
}

fn parse_fields(args: &[String], line: usize) -> Result<FieldInput, SessionError> {
    args.iter()
        .map(|token| {
            token
                .split_once('=')
                .filter(|(key, _)| !key.is_empty())
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| SessionError::MalformedField {
                    line,
                    token: token.clone(),
                })
        })
        .collect()
}

/// Split on whitespace, keeping double-quoted runs together
///
/// Returns `None` when a quote is left open.
fn split_words(line: &str) -> Option<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut in_quotes = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                in_word = true;
            },
            '\\' if in_quotes => {
                current.push(chars.next()?);
            },
            c if c.is_whitespace() && !in_quotes => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            },
            c => {
                current.push(c);
                in_word = true;
            },
        }
    }

    if in_quotes {
        return None;
    }
    if in_word {
        words.push(current);
    }
    Some(words)
}
