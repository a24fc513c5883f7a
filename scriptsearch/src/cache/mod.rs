//! Bounded recency cache for resolved sources.
//!
//! Resolving a source URL is the expensive half of a scoped search: the
//! backend has to fetch and index every transcript behind it. The cache
//! remembers which URLs were already resolved this session so repeat searches
//! skip straight to querying.

mod recency;
mod shared;

pub use recency::{CacheEntry, RecencyCache};
pub use shared::{CacheStats, SourceCache, DEFAULT_CACHE_CAPACITY};
