//! Per-build cache of function definition lines, keyed by source file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, trace};
use parking_lot::RwLock;

use crate::index::{FunctionIndexer, FunctionLines, VimScriptIndexer};

/// Shared `file -> (function name -> definition line)` table.
///
/// Lookups take the read lock and may run together. Populating a missing file
/// indexes it outside any lock and then inserts under the write lock, keeping
/// whichever table landed first. [`FunctionIndexCache::reset`] takes the write
/// lock, so it never overlaps a lookup or an insert.
pub struct FunctionIndexCache {
    indexer: Arc<dyn FunctionIndexer>,
    files: RwLock<HashMap<PathBuf, Arc<FunctionLines>>>,
}

impl std::fmt::Debug for FunctionIndexCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionIndexCache")
            .field("files", &self.files.read().len())
            .finish_non_exhaustive()
    }
}

impl Default for FunctionIndexCache {
    fn default() -> Self {
        Self::new(Arc::new(VimScriptIndexer))
    }
}

impl FunctionIndexCache {
    pub fn new(indexer: Arc<dyn FunctionIndexer>) -> Self {
        Self {
            indexer,
            files: RwLock::new(HashMap::new()),
        }
    }

    /// Drop every cached table.
    pub fn reset(&self) {
        self.files.write().clear();
    }

    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Definition table of `file`, indexing it on first use.
    ///
    /// Unreadable or unparsable files yield an empty table.
    pub fn lookup(&self, file: &Path) -> Arc<FunctionLines> {
        if let Some(table) = self.files.read().get(file) {
            trace!("function index cache hit: {}", file.display());
            return Arc::clone(table);
        }

        let table = match self.indexer.index(file) {
            Ok(table) => table,
            Err(err) => {
                debug!("could not index {}: {err}", file.display());
                FunctionLines::new()
            }
        };

        let mut files = self.files.write();
        Arc::clone(
            files
                .entry(file.to_path_buf())
                .or_insert_with(|| Arc::new(table)),
        )
    }

    /// Definition line of `funcname` in `file`, `0` when unknown.
    pub fn definition_line(&self, funcname: &str, file: &Path) -> usize {
        self.lookup(file).get(funcname).copied().unwrap_or(0)
    }
}
