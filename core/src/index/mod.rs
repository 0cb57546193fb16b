//! Function definition index for Vim script files.
//!
//! Only `:function` definition lines are recognised; everything else in the
//! file is skipped. The result maps each function name, as written in the
//! source, to the 1-based line of its `function` command.

pub mod cursor;
pub mod scanner;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::errors::IndexError;

pub type FunctionLines = HashMap<String, usize>;

/// Turns a source file into a name -> definition line table.
pub trait FunctionIndexer: Send + Sync {
    fn index(&self, path: &Path) -> Result<FunctionLines, IndexError>;
}

/// Indexer backed by [`scanner::Scanner`].
#[derive(Debug, Clone, Copy, Default)]
pub struct VimScriptIndexer;

impl FunctionIndexer for VimScriptIndexer {
    fn index(&self, path: &Path) -> Result<FunctionLines, IndexError> {
        let bytes = fs::read(path).map_err(|source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        index_source(&String::from_utf8_lossy(&bytes))
    }
}

/// Index function definitions in Vim script `source`.
pub fn index_source(source: &str) -> Result<FunctionLines, IndexError> {
    scanner::Scanner::new(source).scan_definitions()
}
