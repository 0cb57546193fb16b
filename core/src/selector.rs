use std::sync::Arc;

use crate::errors::{IntrospectionError, StackError};
use crate::histerrs::{self, ErrorRecord};

/// Picks one of several candidate descriptions.
///
/// Returns the 1-based index of the chosen candidate, `0` when the user
/// cancelled. Anything else is rejected by the caller.
pub trait Selector: Send + Sync {
    fn select(&self, candidates: &[String]) -> Result<i64, IntrospectionError>;
}

#[derive(Clone)]
pub struct SelectorBoxed {
    selector: Arc<dyn Selector>,
}

impl std::fmt::Debug for SelectorBoxed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SelectorBoxed(..)")
    }
}

impl SelectorBoxed {
    pub fn new<T: Selector + 'static>(selector: T) -> Self {
        Self {
            selector: Arc::new(selector),
        }
    }

    pub fn from_closure<F>(callback: F) -> Self
    where
        F: Fn(&[String]) -> Result<i64, IntrospectionError> + Send + Sync + 'static,
    {
        Self::new(ClosureSelector { callback })
    }
}

struct ClosureSelector<F> {
    callback: F,
}

impl<F> Selector for ClosureSelector<F>
where
    F: Fn(&[String]) -> Result<i64, IntrospectionError> + Send + Sync,
{
    fn select(&self, candidates: &[String]) -> Result<i64, IntrospectionError> {
        (self.callback)(candidates)
    }
}

/// Selector that always cancels; the default when nothing can prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct CancelSelector;

impl Selector for CancelSelector {
    fn select(&self, _candidates: &[String]) -> Result<i64, IntrospectionError> {
        Ok(0)
    }
}

/// `"<index>. <throwpoint>: <messages>"` for every record, 1-based.
pub fn candidates(records: &[ErrorRecord]) -> Vec<String> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            format!(
                "{}. {}: {}",
                i + 1,
                record.throwpoint,
                record.messages.join(", ")
            )
        })
        .collect()
}

/// Extract the errors in `msghist` and let `selector` pick one.
///
/// No prompt is shown for zero or one record. `Ok(None)` means there was
/// nothing to pick or the user cancelled.
pub fn select_one<S>(msghist: &str, selector: &S) -> Result<Option<ErrorRecord>, StackError>
where
    S: Selector + ?Sized,
{
    let mut records = histerrs::extract(msghist);
    match records.len() {
        0 => return Ok(None),
        1 => return Ok(records.pop()),
        _ => {}
    }

    let count = records.len();
    let index = selector.select(&candidates(&records))?;
    match usize::try_from(index) {
        Ok(0) => Ok(None),
        Ok(i) if i <= count => Ok(Some(records.swap_remove(i - 1))),
        _ => Err(StackError::InvalidSelection { index, count }),
    }
}

impl Selector for SelectorBoxed {
    fn select(&self, candidates: &[String]) -> Result<i64, IntrospectionError> {
        self.selector.select(candidates)
    }
}
