//! Query validation: decides whether typed text is worth a lookup.

use regex::Regex;
use thiserror::Error;

use crate::config::DEFAULT_QUERY_PATTERN;

#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("Invalid query pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Pure predicate over raw query text.
///
/// The text is trimmed and must match the whole pattern; a pattern without
/// `^`/`$` anchors still has to cover the entire trimmed query.
#[derive(Debug, Clone)]
pub struct QueryValidator {
    pattern: String,
    regex: Regex,
}

impl QueryValidator {
    pub fn new(pattern: &str) -> Result<Self, ValidatorError> {
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| {
            ValidatorError::InvalidPattern {
                pattern: pattern.to_string(),
                source: e,
            }
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// Whether `text` may be submitted to the dictionary.
    pub fn is_submittable(&self, text: &str) -> bool {
        self.regex.is_match(text.trim())
    }

    /// The pattern as configured (without the implicit anchors).
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Default for QueryValidator {
    /// At least two letters, then letters or spaces.
    fn default() -> Self {
        Self {
            pattern: DEFAULT_QUERY_PATTERN.to_string(),
            regex: Regex::new(DEFAULT_QUERY_PATTERN).expect("default query pattern is valid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_words_and_phrases() {
        let validator = QueryValidator::default();
        assert!(validator.is_submittable("dog"));
        assert!(validator.is_submittable("Query one"));
        assert!(validator.is_submittable("Query one q"));
        assert!(validator.is_submittable("  padded  "));
    }

    #[test]
    fn rejects_short_digits_and_punctuation() {
        let validator = QueryValidator::default();
        assert!(!validator.is_submittable(""));
        assert!(!validator.is_submittable("   "));
        assert!(!validator.is_submittable("a"));
        assert!(!validator.is_submittable(" a "));
        assert!(!validator.is_submittable("Query 11"));
        assert!(!validator.is_submittable("dog!"));
        assert!(!validator.is_submittable("d og"));
        assert!(!validator.is_submittable("собака"));
    }

    #[test]
    fn unanchored_pattern_must_cover_whole_query() {
        let validator = QueryValidator::new("[a-z]+").unwrap();
        assert!(validator.is_submittable("dog"));
        assert!(!validator.is_submittable("dog1"));
        assert_eq!(validator.pattern(), "[a-z]+");
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = QueryValidator::new("[a-z").unwrap_err();
        assert!(err.to_string().contains("[a-z"));
    }
}
