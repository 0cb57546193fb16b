//! Throwpoint grammar.
//!
//! A throwpoint names where an error was raised or where a script is
//! currently executing. The runtime prints it in a few shapes:
//!
//! ```text
//! function <SNR>13_test[1]..<SNR>13_test3, line 2
//! Error detected while processing function <SNR>13_test[1]..<SNR>13_test3:
//! line    2:
//! /path/to/file.vim, line 23
//! ```
//!
//! [`normalize`] turns all of them into the canonical bracketed form
//! (`function <SNR>13_test[1]..<SNR>13_test3[2]`, `/path/to/file.vim[23]`)
//! and [`Throwpoint::parse`] splits a canonical chain into [`Link`]s.

mod link;

pub use link::Link;

use crate::errors::StackError;

pub const FUNCTION_PREFIX: &str = "function ";
pub const DETECTED_PREFIX: &str = "Error detected while processing ";

const LIVE_LINE_MARKER: &str = ", line ";
const BLOCK_LINE_MARKER: &str = ":\nline";
const CHAIN_SEPARATOR: &str = "..";

/// Rewrite any known throwpoint shape into the canonical bracketed form.
///
/// Already canonical input is returned unchanged, so `normalize` is idempotent.
pub fn normalize(throwpoint: &str) -> String {
    let throwpoint = strip_detected_prefix(throwpoint);

    if let Some(i) = throwpoint.find(LIVE_LINE_MARKER) {
        let lnum = &throwpoint[i + LIVE_LINE_MARKER.len()..];
        return format!("{}[{}]", &throwpoint[..i], lnum);
    }

    if let Some(j) = throwpoint.find(BLOCK_LINE_MARKER) {
        let rest = throwpoint[j + BLOCK_LINE_MARKER.len()..].trim_end();
        let lnum = rest.strip_suffix(':').unwrap_or(rest).trim_start_matches(' ');
        return format!("{}[{}]", &throwpoint[..j], lnum);
    }

    throwpoint.to_string()
}

fn strip_detected_prefix(mut throwpoint: &str) -> &str {
    while let Some(rest) = throwpoint.strip_prefix(DETECTED_PREFIX) {
        throwpoint = rest;
    }
    throwpoint
}

/// Chain of the caller of `chain`: everything but the innermost link.
///
/// `function Main[2]..F[3]..G` becomes `function Main[2]..F[3]`.
pub fn caller_chain(chain: &str) -> String {
    let mut links: Vec<&str> = chain.split(CHAIN_SEPARATOR).collect();
    links.pop();
    links.join(CHAIN_SEPARATOR)
}

/// A canonical throwpoint split into its links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Throwpoint {
    /// `function <link>..<link>`, outermost caller first.
    Function(Vec<Link>),
    /// `<filepath>[line]`, a position outside any function.
    File(Link),
}

impl Throwpoint {
    pub fn parse(chain: &str) -> Result<Self, StackError> {
        if let Some(links) = chain.strip_prefix(FUNCTION_PREFIX) {
            return Ok(Self::Function(split_links(links)));
        }
        if is_file_position(chain) {
            return Ok(Self::File(Link::parse(chain)));
        }
        Err(StackError::invalid_throwpoint(chain))
    }

    pub fn links(&self) -> &[Link] {
        match self {
            Self::Function(links) => links,
            Self::File(link) => std::slice::from_ref(link),
        }
    }
}

/// Split the body of a function chain (without the `function ` prefix).
pub fn split_links(links: &str) -> Vec<Link> {
    links.split(CHAIN_SEPARATOR).map(Link::parse).collect()
}

/// `true` for `<anything>[<digits>]`.
fn is_file_position(chain: &str) -> bool {
    let Some(rest) = chain.strip_suffix(']') else {
        return false;
    };
    let Some(open) = rest.rfind('[') else {
        return false;
    };
    let digits = &rest[open + 1..];
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_position_requires_trailing_digits() {
        assert!(is_file_position("/path/to/file.vim[23]"));
        assert!(is_file_position("[14].vim[24]"));
        assert!(!is_file_position("/path/to/file.vim"));
        assert!(!is_file_position("/path/to/file.vim[]"));
        assert!(!is_file_position("/path/to/file.vim[x]"));
        assert!(!is_file_position(""));
    }

    #[test]
    fn caller_chain_drops_innermost_link() {
        assert_eq!(
            caller_chain("function Main[2]..F[3]..G"),
            "function Main[2]..F[3]"
        );
        assert_eq!(caller_chain("function G"), "");
        assert_eq!(caller_chain(""), "");
    }
}
