//! Error types for the scriptsearch client core.
//!
//! The `Display` output of [`SearchError`] is the message shown to the user.
//! Diagnostic detail (HTTP status, decode failures) is carried alongside and
//! logged, never displayed.

use thiserror::Error;

/// Message shown when neither a source URL nor a query was supplied.
pub const MISSING_INPUT_MESSAGE: &str = "Please enter a query.";
/// Message shown when a source URL could not be resolved.
pub const RESOLUTION_FAILED_MESSAGE: &str = "Incorrect URL, please try again.";
/// Message shown when the query call fails.
pub const QUERY_FAILED_MESSAGE: &str = "Search failed.";

/// The main error type for search operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    /// The query was rejected locally before any network call.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Neither a source URL nor a query was provided.
    #[error("{}", MISSING_INPUT_MESSAGE)]
    MissingInput,

    /// The source URL could not be resolved by the backend.
    #[error("{}", RESOLUTION_FAILED_MESSAGE)]
    Resolution {
        /// Diagnostic detail from the network boundary.
        detail: String,
    },

    /// The query call failed.
    #[error("{}", QUERY_FAILED_MESSAGE)]
    Query {
        /// Diagnostic detail from the network boundary.
        detail: String,
    },

    /// Another search is still in flight.
    #[error("A search is already in progress.")]
    Busy,

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl SearchError {
    /// Creates a resolution error from a network failure.
    #[must_use]
    pub fn resolution(detail: impl Into<String>) -> Self {
        Self::Resolution {
            detail: detail.into(),
        }
    }

    /// Creates a query error from a network failure.
    #[must_use]
    pub fn query(detail: impl Into<String>) -> Self {
        Self::Query {
            detail: detail.into(),
        }
    }

    /// Returns the diagnostic detail, if the variant carries one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Resolution { detail } | Self::Query { detail } => Some(detail),
            _ => None,
        }
    }

    /// Short machine-readable kind, used in events and log fields.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.kind(),
            Self::MissingInput => "missing_input",
            Self::Resolution { .. } => "resolution",
            Self::Query { .. } => "query",
            Self::Busy => "busy",
            Self::Config(_) => "config",
        }
    }
}

/// Reasons a raw query is rejected by the validator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Nothing left after normalization.
    #[error("{}", MISSING_INPUT_MESSAGE)]
    Empty,

    /// The whole query is a stop word.
    #[error("\"{query}\" is too common to search for, please try something more specific.")]
    CommonWord {
        /// The normalized query.
        query: String,
    },

    /// The query has more words than allowed.
    #[error("Queries are limited to {limit} words ({count} given).")]
    TooManyWords {
        /// Words in the normalized query.
        count: usize,
        /// Configured word limit.
        limit: usize,
    },

    /// The query has more characters than allowed.
    #[error("Queries are limited to {limit} characters ({length} given).")]
    TooLong {
        /// Characters in the normalized query.
        length: usize,
        /// Configured character limit.
        limit: usize,
    },
}

impl ValidationError {
    /// Short machine-readable kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty_query",
            Self::CommonWord { .. } => "common_word",
            Self::TooManyWords { .. } => "too_many_words",
            Self::TooLong { .. } => "too_long",
        }
    }
}

/// Failure at the network boundary.
///
/// There are no structured error codes at this boundary; the orchestrator
/// maps every variant onto a [`SearchError`] for the phase that failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The service answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The response body, possibly empty.
        body: String,
    },

    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Creates a status error.
    #[must_use]
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }
}
