//! Extraction of error records from the runtime's message history.
//!
//! ```text
//! Error detected while processing function Main[2]..<SNR>96_test[1]..F:
//! line    3:
//! E121: Undefined variable: err1
//! E15: Invalid expression: err1
//! line    4:
//! E121: Undefined variable: err2
//! Error detected while processing /path/to/file.vim:
//! line   33:
//! E605: Exception not caught: 0
//! ```
//!
//! yields three records, `...F[3]`, `...F[4]` and `/path/to/file.vim[33]`.

pub mod state;

use log::trace;
use serde::{Deserialize, Serialize};

use state::{Effect, State, transition};

/// One error event found in the message history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Canonical throwpoint, e.g. `function F[5]..<lambda>3[1]..G[2]`.
    pub throwpoint: String,
    /// Error messages such as `E121: Undefined variable: err1`.
    pub messages: Vec<String>,
}

/// Incremental scanner; feed lines, then [`Extractor::finish`].
#[derive(Debug, Default)]
pub struct Extractor {
    state: State,
    pending: ErrorRecord,
    records: Vec<ErrorRecord>,
}

impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, line: &str) {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let (next, effect) = transition(&self.state, line);
        match effect {
            Effect::None => {}
            Effect::Discard => {
                trace!("discarding partial error record at {line:?}");
                self.pending = ErrorRecord::default();
            }
            Effect::Throwpoint(throwpoint) => self.pending.throwpoint = throwpoint,
            Effect::Append(message) => self.pending.messages.push(message),
            Effect::Push => self.push(),
            Effect::PushThen(throwpoint) => {
                self.push();
                self.pending.throwpoint = throwpoint;
            }
        }
        self.state = next;
    }

    /// Flush the in-flight record and return everything found.
    pub fn finish(mut self) -> Vec<ErrorRecord> {
        self.feed("");
        self.records
    }

    fn push(&mut self) {
        self.records.push(std::mem::take(&mut self.pending));
    }
}

/// All error records in `msghist`, in order of appearance.
pub fn extract(msghist: &str) -> Vec<ErrorRecord> {
    let mut extractor = Extractor::new();
    for line in msghist.split('\n') {
        extractor.feed(line);
    }
    extractor.finish()
}
