//! Parsing of user-supplied place queries.
//!
//! Accepted forms: `muzej`, `kafe (3)` (three results) and a list such as
//! `['park (2)', 'biblioteka']`. Single quotes are accepted in lists.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Keyword that ends interactive input.
pub const STOP: &str = "stop";

/// Results requested when a query has no `(N)` suffix.
pub const DEFAULT_LIMIT: u32 = 1;

static LIMIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)\s*\((\d+)\)$").expect("valid regex"));

/// One geocoding query: a place name and how many results to take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceQuery {
    pub name: String,
    pub limit: u32,
}

impl PlaceQuery {
    /// Parse `name` or `name (N)`.
    pub fn parse(item: &str) -> Self {
        let item = item.trim();
        if let Some(caps) = LIMIT_RE.captures(item) {
            if let Ok(limit) = caps[2].parse::<u32>() {
                return Self {
                    name: caps[1].trim().to_string(),
                    limit,
                };
            }
        }
        Self {
            name: item.to_string(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl fmt::Display for PlaceQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.limit > 1 {
            write!(f, "{} ({})", self.name, self.limit)
        } else {
            f.write_str(&self.name)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("input is not a valid list: {0}")]
    InvalidList(#[from] serde_json::Error),
}

/// Whether a line ends interactive input.
pub fn is_stop(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(STOP)
}

/// Parse one line of input into queries. Blank lines and `stop` yield none.
///
/// Non-string list items are skipped with a warning.
pub fn parse_line(line: &str) -> Result<Vec<PlaceQuery>, InputError> {
    let line = line.trim();
    if line.is_empty() || is_stop(line) {
        return Ok(Vec::new());
    }

    if line.starts_with('[') && line.ends_with(']') {
        let items: Vec<serde_json::Value> = serde_json::from_str(&line.replace('\'', "\""))?;
        let queries = items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(PlaceQuery::parse(&s)),
                other => {
                    tracing::warn!(item = %other, "Skipping non-string list item");
                    None
                }
            })
            .collect();
        return Ok(queries);
    }

    Ok(vec![PlaceQuery::parse(line)])
}
