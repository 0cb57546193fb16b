use miette::Diagnostic;
use thiserror::Error;

/// Failure of a query against the live runtime.
#[derive(Debug, Error, Diagnostic)]
pub enum IntrospectionError {
    #[error("{call} failed: {message}")]
    Failed { call: String, message: String },

    #[error("{call} is not string: {value}")]
    NotString { call: String, value: String },

    #[error("{call} is not number: {value}")]
    NotNumber { call: String, value: String },

    #[error("{call}: no runtime attached")]
    #[diagnostic(help("offline mode only resolves what the throwpoint itself carries"))]
    Unavailable { call: String },
}

impl IntrospectionError {
    pub fn failed(call: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            call: call.into(),
            message: message.into(),
        }
    }

    pub fn unavailable(call: impl Into<String>) -> Self {
        Self::Unavailable { call: call.into() }
    }
}
