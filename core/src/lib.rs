//! Rich stacktraces for Vim script.
//!
//! Builds call stacks from throwpoint strings (`v:throwpoint`,
//! `expand('<sfile>')`, message history headers) and extracts error events
//! from the runtime's message history.

pub mod diagnostics;
pub mod errors;
pub mod histerrs;
pub mod index;
pub mod runtime;
pub mod selector;
pub mod service;
pub mod session;
pub mod throwpoint;

pub use diagnostics::{Frame, StackBuilder, Stacktrace};
pub use errors::StackError;
pub use histerrs::ErrorRecord;
pub use runtime::{OfflineRuntime, Runtime};
pub use selector::{Selector, SelectorBoxed};
pub use session::{Session, SessionBuilder};

/// Build a stacktrace from `throwpoint` without a live runtime.
///
/// Function frames only carry what the throwpoint itself says; file frames
/// are still read from disk.
pub fn build_offline(throwpoint: &str) -> Result<Stacktrace, StackError> {
    Session::builder().build(OfflineRuntime).build(throwpoint)
}
