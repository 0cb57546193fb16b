//! Capabilities the stack builder needs from the live runtime.

use std::fs;
use std::io;
use std::path::Path;

use crate::errors::IntrospectionError;

/// Queries against the running editor.
///
/// Implementations sit on the transport layer; the core only ever calls
/// these three methods, one after another, within a single request.
pub trait Runtime: Send + Sync {
    /// Evaluate `expr` and return its value, failing if it is not a string.
    fn eval_string(&self, expr: &str) -> Result<String, IntrospectionError>;

    /// Output of `:verbose function {name}`.
    fn describe_function(&self, name: &str) -> Result<String, IntrospectionError>;

    /// Raw bytes of a script file.
    fn read_source_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    /// Calling chain of the currently executing script, `expand('<sfile>')`.
    fn sfile(&self) -> Result<String, IntrospectionError> {
        self.eval_string("expand('<sfile>')")
    }

    /// Full message history, `execute(':message')`.
    fn message_history(&self) -> Result<String, IntrospectionError> {
        self.eval_string("execute(':message')")
    }
}

/// Runtime used when no editor is attached.
///
/// Every query fails with [`IntrospectionError::Unavailable`]; source files are
/// still read from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineRuntime;

impl Runtime for OfflineRuntime {
    fn eval_string(&self, expr: &str) -> Result<String, IntrospectionError> {
        Err(IntrospectionError::unavailable(expr))
    }

    fn describe_function(&self, name: &str) -> Result<String, IntrospectionError> {
        Err(IntrospectionError::unavailable(format!(
            ":verbose function {name}"
        )))
    }
}
