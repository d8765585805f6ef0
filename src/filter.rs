//! Ignore-pattern matching with full-string semantics
//!
//! A [`PatternSet`] holds compiled regex rules. A candidate matches the set
//! when the *entire* candidate string matches at least one rule; substring
//! hits never count. The crawler uses one set for ignored URLs and the page
//! parser uses another for ignored words.

use crate::TallyError;
use regex::Regex;

/// A set of full-string-match regex rules
#[derive(Debug, Default)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// Compiles a pattern set from raw regex strings
    ///
    /// Each pattern is anchored at both ends so a candidate only matches
    /// when the whole string does.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, TallyError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                let raw = p.as_ref();
                Regex::new(&format!("^(?:{})$", raw)).map_err(|source| {
                    TallyError::InvalidPattern {
                        pattern: raw.to_string(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Returns true if the whole candidate matches any rule in the set
    pub fn matches(&self, candidate: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(candidate))
    }

    /// Returns true if the set has no rules
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
