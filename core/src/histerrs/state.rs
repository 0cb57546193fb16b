//! Transition table of the message history scanner.
//!
//! ```text
//!                  +-----<<<-----(push)-----<<<-----+
//!                  |                                |
//!                  |          +--<-(push)-<--+      |
//!                  |          |              |      |
//! Default -> Detecting -> Line ------> Errmsg ------+
//!  |                                     |  |
//!  +------------<<<------(push)------<<<-+  +-(append)
//! ```
//!
//! Every transition not drawn above is malformed input: the partial record
//! is discarded and scanning continues from `Default`.

use crate::throwpoint::DETECTED_PREFIX;

/// Scanner state. Every state past `Default` carries the header prefix.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    Default,
    /// Saw `Error detected while processing <prefix>:`.
    Detecting { prefix: String },
    /// Saw `line N:`; the pending record has its throwpoint.
    Line { prefix: String },
    /// Collecting `E123: ...` messages.
    Errmsg { prefix: String },
}

/// Side effect of one transition on the pending record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Nothing to do.
    None,
    /// Drop the partial record.
    Discard,
    /// Set the pending throwpoint.
    Throwpoint(String),
    /// Append a message to the pending record.
    Append(String),
    /// Finalize the pending record.
    Push,
    /// Finalize the pending record, then start a new one at this throwpoint.
    PushThen(String),
}

/// Shape of one message history line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `Error detected while processing <prefix>:`
    Header(&'a str),
    /// `line    N:`
    LineNumber(&'a str),
    /// `E121: Undefined variable: x`
    ErrorCode,
    Other,
}

pub fn classify(line: &str) -> LineKind<'_> {
    if let Some(rest) = line.strip_prefix(DETECTED_PREFIX) {
        return LineKind::Header(rest.strip_suffix(':').unwrap_or(rest));
    }
    if let Some(lnum) = line_number(line) {
        return LineKind::LineNumber(lnum);
    }
    if is_error_code(line) {
        return LineKind::ErrorCode;
    }
    LineKind::Other
}

/// Digits of `line\s+(\d+):`.
fn line_number(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("line")?;
    let digits = rest.trim_start().strip_suffix(':')?;
    let has_space = rest.len() > rest.trim_start().len();
    (has_space && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .then_some(digits)
}

/// `E\d+:` at the start of the line.
fn is_error_code(line: &str) -> bool {
    let Some(rest) = line.strip_prefix('E') else {
        return false;
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    digits > 0 && rest[digits..].starts_with(':')
}

/// Next state and effect for `line` read in `state`.
pub fn transition(state: &State, line: &str) -> (State, Effect) {
    let kind = classify(line);
    match (state, kind) {
        (State::Default, LineKind::Header(prefix)) => (detecting(prefix), Effect::None),
        (State::Default, _) => (State::Default, Effect::None),

        (State::Detecting { prefix }, LineKind::LineNumber(lnum)) => (
            State::Line {
                prefix: prefix.clone(),
            },
            Effect::Throwpoint(format!("{prefix}[{lnum}]")),
        ),
        (State::Detecting { .. } | State::Line { .. }, LineKind::Header(prefix)) => {
            (detecting(prefix), Effect::Discard)
        }
        (State::Detecting { .. }, _) => (State::Default, Effect::Discard),

        (State::Line { prefix }, LineKind::ErrorCode) => (
            State::Errmsg {
                prefix: prefix.clone(),
            },
            Effect::Append(line.to_string()),
        ),
        (State::Line { .. }, _) => (State::Default, Effect::Discard),

        (State::Errmsg { .. }, LineKind::ErrorCode) => {
            (state.clone(), Effect::Append(line.to_string()))
        }
        (State::Errmsg { prefix }, LineKind::LineNumber(lnum)) => (
            State::Line {
                prefix: prefix.clone(),
            },
            Effect::PushThen(format!("{prefix}[{lnum}]")),
        ),
        (State::Errmsg { .. }, LineKind::Header(prefix)) => (detecting(prefix), Effect::Push),
        (State::Errmsg { .. }, LineKind::Other) => (State::Default, Effect::Push),
    }
}

fn detecting(prefix: &str) -> State {
    State::Detecting {
        prefix: prefix.to_string(),
    }
}
