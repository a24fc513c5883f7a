//! Configuration for query validation.

use serde::{Deserialize, Serialize};

/// Default maximum number of words in a query.
pub const DEFAULT_WORD_LIMIT: usize = 5;

/// Default maximum number of characters in a query.
pub const DEFAULT_CHARACTER_LIMIT: usize = 75;

/// Words too common to be worth a transcript search on their own.
pub const COMMON_WORDS: &[&str] = &[
    "a", "about", "actually", "almost", "also", "although", "always", "am", "an", "and", "any",
    "are", "as", "at", "be", "became", "become", "but", "by", "can", "could", "did", "do", "does",
    "each", "either", "else", "for", "from", "had", "has", "have", "hence", "how", "he", "her",
    "his", "him", "i", "if", "in", "is", "it", "its", "it's", "just", "may", "maybe", "me",
    "might", "mine", "must", "my", "myself", "neither", "nor", "not", "of", "oh", "ok", "on",
    "she", "the", "then", "through", "that", "thus", "to", "too", "they", "them", "their", "this",
    "when", "where", "whereas", "wherever", "whenever", "whether", "which", "while", "who", "whom",
    "whoever", "whose", "why", "will", "with", "within", "without", "would", "yes", "yet", "you",
    "your", "yours", "yourself", "yourselves",
];

/// Characters removed from a query before it is sent.
///
/// `+` is absent on purpose: it is rewritten to the word `plus` instead.
/// Apostrophes are kept so contractions still match transcripts.
pub const SPECIAL_CHARS: &[char] = &[
    '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '-', '_', '=', '[', ']', '{', '}', '\\', '|',
    ':', ';', '<', '>', ',', '.', '?', '/', '"',
];

/// Limits and word lists applied by the query validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Maximum number of whitespace-separated words.
    #[serde(default = "default_word_limit")]
    pub word_limit: usize,
    /// Maximum number of characters after normalization.
    #[serde(default = "default_character_limit")]
    pub character_limit: usize,
    /// Stop words rejected when they make up the whole query.
    #[serde(default = "default_common_words")]
    pub common_words: Vec<String>,
    /// Characters stripped from the query.
    #[serde(default = "default_special_chars")]
    pub special_chars: Vec<char>,
}

fn default_word_limit() -> usize {
    DEFAULT_WORD_LIMIT
}

fn default_character_limit() -> usize {
    DEFAULT_CHARACTER_LIMIT
}

fn default_common_words() -> Vec<String> {
    COMMON_WORDS.iter().map(|w| (*w).to_string()).collect()
}

fn default_special_chars() -> Vec<char> {
    SPECIAL_CHARS.to_vec()
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            word_limit: default_word_limit(),
            character_limit: default_character_limit(),
            common_words: default_common_words(),
            special_chars: default_special_chars(),
        }
    }
}

impl ValidatorConfig {
    /// Creates a new validator configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the word limit.
    #[must_use]
    pub fn with_word_limit(mut self, limit: usize) -> Self {
        self.word_limit = limit;
        self
    }

    /// Sets the character limit.
    #[must_use]
    pub fn with_character_limit(mut self, limit: usize) -> Self {
        self.character_limit = limit;
        self
    }

    /// Adds a stop word.
    #[must_use]
    pub fn with_common_word(mut self, word: impl Into<String>) -> Self {
        self.common_words.push(word.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validator_config_defaults() {
        let config = ValidatorConfig::default();
        assert_eq!(config.word_limit, 5);
        assert_eq!(config.character_limit, 75);
        assert!(config.common_words.contains(&"the".to_string()));
        assert!(config.common_words.contains(&"it's".to_string()));
    }

    #[test]
    fn test_special_chars_keep_plus_and_apostrophe() {
        assert!(!SPECIAL_CHARS.contains(&'+'));
        assert!(!SPECIAL_CHARS.contains(&'\''));
        assert!(SPECIAL_CHARS.contains(&'?'));
    }

    #[test]
    fn test_validator_config_builder() {
        let config = ValidatorConfig::new()
            .with_word_limit(3)
            .with_character_limit(20)
            .with_common_word("um");

        assert_eq!(config.word_limit, 3);
        assert_eq!(config.character_limit, 20);
        assert!(config.common_words.contains(&"um".to_string()));
    }

    #[test]
    fn test_validator_config_partial_json() {
        let config: ValidatorConfig = serde_json::from_str(r#"{"word_limit": 8}"#).unwrap();
        assert_eq!(config.word_limit, 8);
        assert_eq!(config.character_limit, DEFAULT_CHARACTER_LIMIT);
        assert_eq!(config.special_chars, SPECIAL_CHARS.to_vec());
    }
}
