//! Query normalization and rejection.

use std::collections::HashSet;

use super::config::ValidatorConfig;
use crate::errors::ValidationError;

/// Normalizes raw user queries and rejects ones the backend cannot serve well.
///
/// Validation is pure: no network, no storage, no logging of the query.
#[derive(Debug, Clone)]
pub struct QueryValidator {
    word_limit: usize,
    character_limit: usize,
    common_words: HashSet<String>,
    special_chars: HashSet<char>,
}

impl Default for QueryValidator {
    fn default() -> Self {
        Self::new(&ValidatorConfig::default())
    }
}

impl QueryValidator {
    /// Creates a validator from configuration.
    #[must_use]
    pub fn new(config: &ValidatorConfig) -> Self {
        Self {
            word_limit: config.word_limit,
            character_limit: config.character_limit,
            common_words: config.common_words.iter().map(|w| w.to_lowercase()).collect(),
            special_chars: config.special_chars.iter().copied().collect(),
        }
    }

    /// Strips special characters, spells out `+` and collapses whitespace.
    ///
    /// Case is preserved; [`validate`](Self::validate) lower-cases the result.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        let mut spelled = String::with_capacity(raw.len());
        for c in raw.chars() {
            if c == '+' {
                spelled.push_str(" plus ");
            } else if !self.special_chars.contains(&c) {
                spelled.push(c);
            }
        }
        spelled.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Validates a raw query, returning the normalized lower-case form.
    pub fn validate(&self, raw: &str) -> Result<String, ValidationError> {
        let normalized = self.normalize(raw).to_lowercase();

        if normalized.is_empty() {
            return Err(ValidationError::Empty);
        }

        if self.common_words.contains(&normalized) {
            return Err(ValidationError::CommonWord { query: normalized });
        }

        let count = normalized.split_whitespace().count();
        if count > self.word_limit {
            return Err(ValidationError::TooManyWords {
                count,
                limit: self.word_limit,
            });
        }

        let length = normalized.chars().count();
        if length > self.character_limit {
            return Err(ValidationError::TooLong {
                length,
                limit: self.character_limit,
            });
        }

        Ok(normalized)
    }
}
