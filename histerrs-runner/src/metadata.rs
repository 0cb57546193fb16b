use serde::Deserialize;
use vimstack::ErrorRecord;

const MARKER: &str = "---";

fn default_true() -> bool {
    true
}

/// YAML front matter of a `.msghist` fixture.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureMetadata {
    #[serde(default)]
    pub description: Option<String>,
    /// Records the extractor must produce, in order.
    #[serde(default)]
    pub expect: Vec<ErrorRecord>,
    /// Also require every extracted throwpoint to build offline.
    #[serde(default = "default_true")]
    pub build: bool,
}

/// Split `---\n<yaml>\n---\n<body>` into its two halves.
fn split_frontmatter(source: &str) -> Option<(&str, &str)> {
    let rest = source.strip_prefix(MARKER)?.strip_prefix('\n')?;
    let end = rest.find("\n---\n").map(|i| (i, i + 5)).or_else(|| {
        rest.strip_suffix("\n---")
            .map(|yaml| (yaml.len(), rest.len()))
    })?;
    Some((&rest[..end.0], &rest[end.1..]))
}

pub fn parse_frontmatter(source: &str) -> Option<FixtureMetadata> {
    let (yaml, _) = split_frontmatter(source)?;
    serde_yaml::from_str(yaml).ok()
}

/// Message history following the front matter.
pub fn strip_frontmatter(source: &str) -> &str {
    split_frontmatter(source).map_or(source, |(_, body)| body)
}
