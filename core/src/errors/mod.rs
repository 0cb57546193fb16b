mod index_error;
mod introspection_error;

pub use index_error::IndexError;
pub use introspection_error::IntrospectionError;

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for every stacktrace request.
#[derive(Debug, Error, Diagnostic)]
pub enum StackError {
    #[error("invalid throwpoint: {throwpoint:?}")]
    #[diagnostic(help(
        "expected `function Name[line]..Name[line]` or `/path/to/file.vim[line]`"
    ))]
    InvalidThrowpoint { throwpoint: String },

    #[error("selected invalid number: {index} (there are {count} candidates)")]
    InvalidSelection { index: i64, count: usize },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Introspection(#[from] IntrospectionError),

    #[error("invalid request: {message}")]
    InvalidRequest { message: String },
}

impl StackError {
    pub fn invalid_throwpoint(throwpoint: impl Into<String>) -> Self {
        Self::InvalidThrowpoint {
            throwpoint: throwpoint.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }
}
