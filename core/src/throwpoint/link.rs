use std::fmt;

/// One `body[line]` segment of a throwpoint chain.
///
/// `body` is a function name for function chains and a file path for file
/// positions. A segment without a trailing bracket keeps its whole text as
/// `body` and gets line `0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub body: String,
    pub line: usize,
}

impl Link {
    pub fn new(body: impl Into<String>, line: usize) -> Self {
        Self {
            body: body.into(),
            line,
        }
    }

    /// Split on the rightmost `[`..`]` pair; paths may contain `[` themselves.
    pub fn parse(token: &str) -> Self {
        let Some(rest) = token.strip_suffix(']') else {
            return Self::new(token, 0);
        };
        match rest.rfind('[') {
            Some(open) => Self::new(&rest[..open], rest[open + 1..].parse().unwrap_or(0)),
            None => Self::new(token, 0),
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.body, self.line)
    }
}
