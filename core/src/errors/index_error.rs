use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum IndexError {
    #[error("could not read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: `endfunction` without a matching `function`")]
    UnmatchedEnd { line: usize },

    #[error("line {line}: function '{name}' is never closed")]
    #[diagnostic(help("every `function` needs a matching `endfunction`"))]
    Unterminated { name: String, line: usize },
}
