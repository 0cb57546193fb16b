//! Stack builder: turns a canonical throwpoint into a [`Stacktrace`].
//!
//! Each function link is resolved against the live runtime (its verbose
//! function dump) and against the static source file that dump points to
//! (through the [`FunctionIndexCache`]). Anything that can't be resolved for a
//! single frame is left empty; only a malformed chain or a failed top-level
//! runtime query fails the build.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;

use super::func_cache::FunctionIndexCache;
use super::function_dump::FunctionDump;
use super::names::{display_name, source_name};
use super::stack_trace::{Frame, Stacktrace};
use crate::errors::StackError;
use crate::runtime::Runtime;
use crate::throwpoint::{self, Throwpoint};

pub struct StackBuilder {
    runtime: Arc<dyn Runtime>,
    cache: Arc<FunctionIndexCache>,
    home_dir: Option<PathBuf>,
}

impl StackBuilder {
    pub fn new(runtime: Arc<dyn Runtime>, cache: Arc<FunctionIndexCache>) -> Self {
        Self {
            runtime,
            cache,
            home_dir: None,
        }
    }

    /// Directory that replaces a leading `~/` in `Last set from` paths.
    pub fn with_home_dir(mut self, home_dir: Option<PathBuf>) -> Self {
        self.home_dir = home_dir;
        self
    }

    pub fn cache(&self) -> &Arc<FunctionIndexCache> {
        &self.cache
    }

    /// Normalize `throwpoint` and build its stacktrace.
    pub fn build(&self, throwpoint: &str) -> Result<Stacktrace, StackError> {
        self.build_from_chain(&throwpoint::normalize(throwpoint))
    }

    /// Build from an already canonical chain.
    pub fn build_from_chain(&self, chain: &str) -> Result<Stacktrace, StackError> {
        let frames = match Throwpoint::parse(chain)? {
            Throwpoint::Function(links) => {
                self.cache.reset();
                links
                    .iter()
                    .map(|link| self.function_frame(&link.body, link.line))
                    .collect()
            }
            Throwpoint::File(link) => vec![self.file_frame(&link.body, link.line)],
        };
        Ok(Stacktrace::new(frames))
    }

    /// Stacktrace of whoever called into the runtime query.
    pub fn callstack(&self) -> Result<Stacktrace, StackError> {
        let sfile = self.runtime.sfile()?;
        self.build_from_chain(&throwpoint::caller_chain(&sfile))
    }

    fn function_frame(&self, body: &str, flnum: usize) -> Frame {
        let funcname = display_name(body);
        let mut frame = Frame::function(&*funcname, flnum);

        let dump = match self.runtime.describe_function(&funcname) {
            Ok(dump) => dump,
            Err(err) => {
                // lambdas and partials have no durable definition
                debug!("no function dump for {funcname}: {err}");
                return frame;
            }
        };
        let dump = FunctionDump::parse(&dump, self.home_dir.as_deref());

        if let Some(text) = dump.line_text(flnum) {
            frame.line = text.to_string();
            frame.text.push_str(text);
        }

        if let Some(file) = dump.source_file() {
            frame.filename = file.to_string_lossy().into_owned();
            frame.lnum = self.absolute_line(&funcname, file, flnum);
        }
        frame
    }

    /// `0` when the definition line of `funcname` in `file` is unknown.
    fn absolute_line(&self, funcname: &str, file: &Path, flnum: usize) -> usize {
        match self.cache.definition_line(&source_name(funcname), file) {
            0 => {
                debug!("{funcname} not found in {}", file.display());
                0
            }
            def => def + flnum,
        }
    }

    fn file_frame(&self, filename: &str, lnum: usize) -> Frame {
        let mut frame = Frame::file(filename, lnum);
        let bytes = match self.runtime.read_source_file(Path::new(filename)) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!("could not read {filename}: {err}");
                return frame;
            }
        };
        let source = String::from_utf8_lossy(&bytes);
        if let Some(text) = lnum.checked_sub(1).and_then(|i| source.lines().nth(i)) {
            frame.line = text.to_string();
            frame.text = text.to_string();
        }
        frame
    }
}
