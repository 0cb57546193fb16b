//! Parsing of `:verbose function {name}` output.
//!
//! ```text
//!    function <SNR>13_test() abort
//! 	Last set from ~/plugin/test.vim line 7
//! 1    let l:G = {-> s:test2()}
//! 2    return l:G()
//!    endfunction
//! ```

use std::path::{Path, PathBuf};

const LAST_SET_PREFIX: &str = "Last set from ";
const LINE_SUFFIX: &str = " line ";
/// Body lines start with the line number left aligned in at least this many columns.
const NUMBER_COLUMNS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDump<'a> {
    source_file: Option<PathBuf>,
    lines: Vec<&'a str>,
}

impl<'a> FunctionDump<'a> {
    /// Parse `dump`, expanding a leading `~/` in the source path with `home`.
    pub fn parse(dump: &'a str, home: Option<&Path>) -> Self {
        let lines: Vec<&str> = dump.trim_matches('\n').lines().collect();
        let source_file = lines
            .get(1)
            .and_then(|line| line.trim_start().strip_prefix(LAST_SET_PREFIX))
            .map(|path| expand_home(strip_line_suffix(path), home));
        Self { source_file, lines }
    }

    /// File the function was defined in, `None` for command-line definitions.
    pub fn source_file(&self) -> Option<&Path> {
        self.source_file.as_deref()
    }

    /// Text of body line `flnum`.
    ///
    /// Every body line numbered `flnum` is visited and the last one wins.
    pub fn line_text(&self, flnum: usize) -> Option<&'a str> {
        self.lines
            .iter()
            .copied()
            .filter_map(split_numbered)
            .filter(|&(number, _)| number == flnum)
            .map(|(_, text)| text)
            .last()
    }
}

/// Split `12   let x = 1` into `(12, "  let x = 1")`.
fn split_numbered(line: &str) -> Option<(usize, &str)> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let number = line[..digits].parse().ok()?;
    let rest = &line[digits..];
    let padding = NUMBER_COLUMNS
        .saturating_sub(digits)
        .min(rest.bytes().take_while(|&b| b == b' ').count());
    Some((number, &rest[padding..]))
}

/// `~/x.vim line 12` -> `~/x.vim`
fn strip_line_suffix(path: &str) -> &str {
    if let Some(i) = path.rfind(LINE_SUFFIX) {
        let lnum = &path[i + LINE_SUFFIX.len()..];
        if !lnum.is_empty() && lnum.bytes().all(|b| b.is_ascii_digit()) {
            return &path[..i];
        }
    }
    path
}

fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
