use std::fmt;

use serde::{Deserialize, Serialize};

fn is_zero(n: &usize) -> bool {
    *n == 0
}

/// One resolved entry of a [`Stacktrace`].
///
/// Field names follow the quickfix list so a serialized frame can be passed
/// to `setqflist()` as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Frame {
    /// Function name including `<SNR>` for script-local functions; empty for
    /// file frames.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub funcname: String,
    /// Line number relative to the start of the function.
    #[serde(skip_serializing_if = "is_zero")]
    pub flnum: usize,
    /// Source text of the line, empty for lambdas and partials.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub line: String,
    /// Empty if the function was defined on the command line.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub filename: String,
    /// Line number relative to the start of the file.
    #[serde(skip_serializing_if = "is_zero")]
    pub lnum: usize,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
}

impl Frame {
    /// Frame for a function link, text starts out as `name:flnum:`.
    pub fn function(funcname: impl Into<String>, flnum: usize) -> Self {
        let funcname = funcname.into();
        let text = format!("{funcname}:{flnum}:");
        Self {
            funcname,
            flnum,
            text,
            ..Self::default()
        }
    }

    pub fn file(filename: impl Into<String>, lnum: usize) -> Self {
        Self {
            filename: filename.into(),
            lnum,
            ..Self::default()
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.filename, self.lnum, self.text)
    }
}

/// Frames ordered from the outermost caller to the frame that threw.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stacktrace {
    #[serde(rename = "stacks")]
    frames: Vec<Frame>,
}

impl Stacktrace {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The innermost frame.
    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut Frame> {
        self.frames.last_mut()
    }

    /// Innermost frame first, one `file:lnum: text` line per frame.
    pub fn format_trace(&self) -> String {
        let mut out = String::new();
        for frame in self.frames.iter().rev() {
            out.push_str(&format!("    at {frame}\n"));
        }
        out
    }
}
