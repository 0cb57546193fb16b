use log::trace;

use super::FunctionLines;
use super::cursor::Cursor;
use crate::errors::IndexError;

const FUNCTION: &str = "function";
const ENDFUNCTION: &str = "endfunction";
const SID_PREFIX: &str = "<SID>";

/// What a single line contributes to the definition index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'src> {
    Definition(&'src str),
    End,
    Other,
}

pub struct Scanner<'src> {
    source: &'src str,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self { source }
    }

    pub fn scan_definitions(&self) -> Result<FunctionLines, IndexError> {
        let mut funcs = FunctionLines::new();
        let mut open: Vec<(&str, usize)> = Vec::new();

        for (idx, line) in self.source.lines().enumerate() {
            let lnum = idx + 1;
            match classify_line(line) {
                LineKind::Definition(name) => {
                    open.push((name, lnum));
                    if let Some(key) = index_key(name) {
                        trace!("indexed function {key} at line {lnum}");
                        funcs.insert(key, lnum);
                    }
                }
                LineKind::End => {
                    if open.pop().is_none() {
                        return Err(IndexError::UnmatchedEnd { line: lnum });
                    }
                }
                LineKind::Other => {}
            }
        }

        if let Some((name, line)) = open.pop() {
            return Err(IndexError::Unterminated {
                name: name.to_string(),
                line,
            });
        }
        Ok(funcs)
    }
}

/// Classify one line of Vim script.
pub fn classify_line(line: &str) -> LineKind<'_> {
    let mut cursor = Cursor::new(line);
    cursor.skip_while(|b| b == b' ' || b == b'\t' || b == b':');

    match cursor.peek() {
        None | Some(b'"') | Some(b'\\') => return LineKind::Other,
        _ => {}
    }

    let start = cursor.pos();
    cursor.skip_while(|b| b.is_ascii_alphabetic());
    let command = cursor.slice_from(start);

    if is_abbreviation(command, ENDFUNCTION, 4) {
        return LineKind::End;
    }
    if !is_abbreviation(command, FUNCTION, 2) {
        return LineKind::Other;
    }

    cursor.match_char(b'!');
    cursor.skip_blanks();
    let name_start = cursor.pos();
    cursor.skip_while(|b| b != b'(' && b != b' ' && b != b'\t');
    let name = cursor.slice_from(name_start);
    cursor.skip_blanks();

    // `:function Name` without an argument list only lists the function.
    if name.is_empty() || !cursor.match_char(b'(') {
        return LineKind::Other;
    }
    LineKind::Definition(name)
}

/// `true` when `word` is `full` shortened to at least `min` characters.
fn is_abbreviation(word: &str, full: &str, min: usize) -> bool {
    word.len() >= min && full.starts_with(word)
}

/// Key a definition is stored under, `None` for dictionary and computed names.
fn index_key(name: &str) -> Option<String> {
    if name.contains(['.', '[', '{']) {
        return None;
    }
    match name.get(..SID_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(SID_PREFIX) => {
            Some(format!("s:{}", &name[SID_PREFIX.len()..]))
        }
        _ => Some(name.to_string()),
    }
}
