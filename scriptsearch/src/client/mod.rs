//! Transcript API client.

mod config;
#[cfg(feature = "http")]
mod http;
mod protocols;

pub use config::{ApiConfig, DEFAULT_API_URL};
#[cfg(feature = "http")]
pub use http::HttpTranscriptApi;
pub use protocols::{QueryRequest, QueryResponse, ResolveRequest, ResolveResponse, TranscriptApi};
