use std::path::PathBuf;
use std::sync::Arc;

use crate::diagnostics::{FunctionIndexCache, StackBuilder, Stacktrace};
use crate::errors::StackError;
use crate::histerrs::{self, ErrorRecord};
use crate::index::{FunctionIndexer, VimScriptIndexer};
use crate::runtime::Runtime;
use crate::selector::{self, CancelSelector, SelectorBoxed};

#[derive(Clone)]
pub struct SessionBuilder {
    home_dir: Option<PathBuf>,
    indexer: Option<Arc<dyn FunctionIndexer>>,
    selector: Option<SelectorBoxed>,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self {
            home_dir: dirs::home_dir(),
            indexer: None,
            selector: None,
        }
    }
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_home_dir(mut self, home_dir: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(home_dir.into());
        self
    }

    pub fn with_indexer<I: FunctionIndexer + 'static>(mut self, indexer: I) -> Self {
        self.indexer = Some(Arc::new(indexer));
        self
    }

    pub fn with_selector(mut self, selector: SelectorBoxed) -> Self {
        self.selector = Some(selector);
        self
    }

    pub fn build<R: Runtime + 'static>(self, runtime: R) -> Session {
        let runtime: Arc<dyn Runtime> = Arc::new(runtime);
        let indexer = self
            .indexer
            .unwrap_or_else(|| Arc::new(VimScriptIndexer));
        let cache = Arc::new(FunctionIndexCache::new(indexer));
        Session {
            runtime: Arc::clone(&runtime),
            builder: StackBuilder::new(runtime, cache).with_home_dir(self.home_dir),
            selector: self
                .selector
                .unwrap_or_else(|| SelectorBoxed::new(CancelSelector)),
        }
    }
}

/// Everything a client can ask for, bound to one runtime.
pub struct Session {
    runtime: Arc<dyn Runtime>,
    builder: StackBuilder,
    selector: SelectorBoxed,
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn stack_builder(&self) -> &StackBuilder {
        &self.builder
    }

    /// Stacktrace of the caller.
    pub fn callstack(&self) -> Result<Stacktrace, StackError> {
        self.builder.callstack()
    }

    /// Stacktrace of a throwpoint in any of the runtime's formats.
    pub fn build(&self, throwpoint: &str) -> Result<Stacktrace, StackError> {
        self.builder.build(throwpoint)
    }

    /// Every error in `msghist`, or in the runtime's message history.
    pub fn histerrs(&self, msghist: Option<&str>) -> Result<Vec<ErrorRecord>, StackError> {
        match msghist {
            Some(msghist) => Ok(histerrs::extract(msghist)),
            None => Ok(histerrs::extract(&self.runtime.message_history()?)),
        }
    }

    /// Let the configured selector pick one error out of `msghist`.
    pub fn select_error(&self, msghist: &str) -> Result<Option<ErrorRecord>, StackError> {
        selector::select_one(msghist, &self.selector)
    }

    /// Stacktrace of an error picked from the runtime's message history.
    ///
    /// The innermost frame's text is prefixed with the error messages.
    pub fn from_history(&self) -> Result<Option<Stacktrace>, StackError> {
        let msghist = self.runtime.message_history()?;
        let Some(selected) = self.select_error(&msghist)? else {
            return Ok(None);
        };
        let mut stacktrace = self.build(&selected.throwpoint)?;
        if let Some(last) = stacktrace.last_mut() {
            last.text = format!("{} : {}", selected.messages.join(", "), last.text);
        }
        Ok(Some(stacktrace))
    }
}
