use anyhow::Result;
use regex::Regex;

use crate::config::config::FilterConfig;

/// A parsed column filter expression, matched against column titles.
///
/// - empty: every column passes
/// - `regex:<pattern>`: the whole title must match the pattern
/// - `a,b,c`: the title contains any of the terms
/// - anything else: the title contains the text
///
/// Matching is case-sensitive.
#[derive(Debug, Clone)]
pub enum ColumnFilter {
    All,
    Pattern(Regex),
    Terms(Vec<String>),
}

impl ColumnFilter {
    /// Parse a filter expression. Fails only for a malformed regex.
    pub fn parse(expression: &str, config: &FilterConfig) -> Result<Self> {
        if expression.is_empty() {
            return Ok(ColumnFilter::All);
        }

        if let Some(pattern) = expression.strip_prefix(config.regex_prefix.as_str()) {
            let anchored = Regex::new(&format!("^(?:{})$", pattern))?;
            return Ok(ColumnFilter::Pattern(anchored));
        }

        let terms: Vec<String> = if config.term_separator.is_empty() {
            vec![expression.to_string()]
        } else {
            expression
                .split(config.term_separator.as_str())
                .filter(|term| !term.is_empty())
                .map(str::to_string)
                .collect()
        };

        if terms.is_empty() {
            Ok(ColumnFilter::All)
        } else {
            Ok(ColumnFilter::Terms(terms))
        }
    }

    pub fn matches(&self, title: &str) -> bool {
        match self {
            ColumnFilter::All => true,
            ColumnFilter::Pattern(regex) => regex.is_match(title),
            ColumnFilter::Terms(terms) => terms.iter().any(|term| title.contains(term.as_str())),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, ColumnFilter::All)
    }
}

/// One-shot match of a title against an expression. `None` when the
/// expression is a malformed regex.
pub fn matches(title: &str, expression: &str, config: &FilterConfig) -> Option<bool> {
    ColumnFilter::parse(expression, config)
        .ok()
        .map(|filter| filter.matches(title))
}
