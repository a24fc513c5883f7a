//! Query validation.
//!
//! Raw user input is normalized (special characters stripped, `+` spelled
//! out, whitespace collapsed, lower-cased) and rejected when it is a lone stop
//! word, has too many words, or is too long.

mod config;
mod query;

pub use config::{
    ValidatorConfig, COMMON_WORDS, DEFAULT_CHARACTER_LIMIT, DEFAULT_WORD_LIMIT, SPECIAL_CHARS,
};
pub use query::QueryValidator;
