//! Session-wide source cache shared between searches.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::debug;

use super::recency::RecencyCache;
use crate::core::ResolvedSource;
use crate::errors::SearchError;

/// Default number of resolved sources kept per session.
pub const DEFAULT_CACHE_CAPACITY: usize = 10;

/// Counters describing cache traffic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Entries currently held.
    pub entries: usize,
    /// Configured capacity.
    pub capacity: usize,
    /// Lookups that found an entry.
    pub hits: u64,
    /// Lookups that found nothing.
    pub misses: u64,
    /// Entries dropped to make room.
    pub evictions: u64,
}

#[derive(Debug)]
struct Inner {
    entries: RecencyCache<ResolvedSource>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

/// Handle to the session's resolved-source cache.
///
/// Clones share the same storage. Every operation takes the lock once, so a
/// lookup's find-and-promote cannot interleave with another search's insert.
#[derive(Debug, Clone)]
pub struct SourceCache {
    inner: Arc<Mutex<Inner>>,
}

impl SourceCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                entries: RecencyCache::new(capacity),
                hits: 0,
                misses: 0,
                evictions: 0,
            })),
        }
    }

    /// Creates an empty cache, rejecting a zero capacity.
    pub fn with_capacity(capacity: usize) -> Result<Self, SearchError> {
        NonZeroUsize::new(capacity)
            .map(Self::new)
            .ok_or_else(|| SearchError::Config("cache capacity must be at least 1".to_string()))
    }

    /// Stores the resolved identifiers for `url` at the MRU end.
    pub fn put(&self, url: &str, source: ResolvedSource) {
        let mut inner = self.inner.lock();
        if let Some(evicted) = inner.entries.put(url, source) {
            inner.evictions += 1;
            debug!(evicted = %evicted.key, "Source cache full, evicted oldest entry");
        }
    }

    /// Returns a copy of the cached payload without reordering.
    #[must_use]
    pub fn find(&self, url: &str) -> Option<ResolvedSource> {
        self.inner.lock().entries.find(url).cloned()
    }

    /// Moves `url` to the MRU end.
    pub fn promote(&self, url: &str) -> bool {
        self.inner.lock().entries.promote(url)
    }

    /// Find and promote under one lock, counting the hit or miss.
    pub fn lookup(&self, url: &str) -> Option<ResolvedSource> {
        let mut inner = self.inner.lock();
        let found = inner.entries.lookup(url);
        if found.is_some() {
            inner.hits += 1;
        } else {
            inner.misses += 1;
        }
        found
    }

    /// Snapshot of cached URLs, LRU first.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.inner.lock().entries.keys()
    }

    /// Number of cached sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    /// Drops every entry. Counters are kept.
    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        CacheStats {
            entries: inner.entries.len(),
            capacity: inner.entries.capacity(),
            hits: inner.hits,
            misses: inner.misses,
            evictions: inner.evictions,
        }
    }
}

impl Default for SourceCache {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(DEFAULT_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(SourceCache::with_capacity(0), Err(SearchError::Config(_))));
        assert!(SourceCache::with_capacity(1).is_ok());
    }

    #[test]
    fn test_clones_share_storage() {
        let cache = SourceCache::with_capacity(2).unwrap();
        let handle = cache.clone();

        handle.put("u1", ResolvedSource::channel("UC1"));
        assert_eq!(cache.find("u1"), Some(ResolvedSource::channel("UC1")));
    }

    #[test]
    fn test_lookup_counts_and_promotes() {
        let cache = SourceCache::with_capacity(3).unwrap();
        cache.put("u1", ResolvedSource::channel("UC1"));
        cache.put("u2", ResolvedSource::videos(["v1"]));

        assert_eq!(cache.lookup("u1"), Some(ResolvedSource::channel("UC1")));
        assert_eq!(cache.lookup("u3"), None);
        assert_eq!(cache.keys(), vec!["u2", "u1"]);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 2);
        assert_eq!(stats.capacity, 3);
    }

    #[test]
    fn test_evictions_counted() {
        let cache = SourceCache::with_capacity(1).unwrap();
        cache.put("u1", ResolvedSource::channel("UC1"));
        cache.put("u2", ResolvedSource::channel("UC2"));

        assert_eq!(cache.keys(), vec!["u2"]);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_concurrent_puts_keep_invariants() {
        let cache = SourceCache::with_capacity(4).unwrap();
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    for i in 0..50 {
                        cache.put(&format!("u{}", (t * 50 + i) % 6), ResolvedSource::channel("UC"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let keys = cache.keys();
        assert!(keys.len() <= 4);
        let mut unique = keys.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), keys.len());
    }
}
