//! Exclude keywords -- events whose titles match are treated as free time.
//!
//! # Syntax
//!
//! The raw text is a comma-separated list of tokens:
//!
//! - `block` -- partial match: case-insensitive "title contains `block`"
//! - `"Lunch"` -- exact match: the title must equal `Lunch`, case included
//!
//! There is no escaping. A token only counts as quoted when it both starts and
//! ends with `"` and has at least one character in between; anything else
//! (`"`, `""`, `"open`) is kept verbatim as a partial keyword.

use serde::{Deserialize, Serialize};

/// One parsed exclude keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludeRule {
    pub keyword: String,
    pub exact: bool,
}

impl ExcludeRule {
    pub fn exact(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            exact: true,
        }
    }

    pub fn partial(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            exact: false,
        }
    }

    /// Parse a single already-trimmed token.
    fn parse(token: &str) -> Self {
        match token
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
        {
            Some(inner) if !inner.is_empty() => Self::exact(inner),
            _ => Self::partial(token),
        }
    }

    /// Whether `title` satisfies this rule.
    pub fn is_match(&self, title: &str) -> bool {
        if self.exact {
            title == self.keyword
        } else {
            title
                .to_lowercase()
                .contains(&self.keyword.to_lowercase())
        }
    }
}

/// Parse user-entered exclude keywords into rules.
///
/// Tokens are split on commas and trimmed; empty tokens are dropped.
///
/// # Examples
///
/// ```
/// use freetime_engine::{parse_exclude_keywords, ExcludeRule};
///
/// let rules = parse_exclude_keywords(r#""Lunch", block"#);
/// assert_eq!(
///     rules,
///     vec![ExcludeRule::exact("Lunch"), ExcludeRule::partial("block")]
/// );
/// ```
pub fn parse_exclude_keywords(raw: &str) -> Vec<ExcludeRule> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ExcludeRule::parse)
        .collect()
}

/// Return the first rule, in input order, that matches `title`.
pub fn matches<'a>(title: &str, rules: &'a [ExcludeRule]) -> Option<&'a ExcludeRule> {
    rules.iter().find(|rule| rule.is_match(title))
}
