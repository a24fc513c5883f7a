//! Fixed-capacity recency-ordered store.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

/// A cached key and its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry<V> {
    /// The key, a source URL for the source cache.
    pub key: String,
    /// The stored payload.
    pub payload: V,
}

/// Bounded cache ordered from least- to most-recently used.
///
/// Invariants: `len() <= capacity()`, keys are unique, and the back of the
/// sequence is always the entry most recently inserted or promoted.
/// Lookups are linear scans; capacities are expected to stay small.
#[derive(Debug, Clone)]
pub struct RecencyCache<V> {
    capacity: NonZeroUsize,
    entries: VecDeque<CacheEntry<V>>,
}

impl<V> RecencyCache<V> {
    /// Creates an empty cache holding at most `capacity` entries.
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity.get()),
        }
    }

    /// Maximum number of entries.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Current number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key == key)
    }

    /// Inserts at the MRU end.
    ///
    /// An existing entry for `key` is replaced. When the cache is full the LRU
    /// entry is evicted first and returned.
    pub fn put(&mut self, key: impl Into<String>, payload: V) -> Option<CacheEntry<V>> {
        let key = key.into();
        let mut evicted = None;

        if let Some(index) = self.position(&key) {
            self.entries.remove(index);
        } else if self.entries.len() >= self.capacity.get() {
            evicted = self.entries.pop_front();
        }

        self.entries.push_back(CacheEntry { key, payload });
        evicted
    }

    /// Looks up a payload without touching the recency order.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.payload)
    }

    /// Moves `key` to the MRU end. Returns false if the key is absent.
    ///
    /// The entry is moved as-is; its payload is untouched.
    pub fn promote(&mut self, key: &str) -> bool {
        match self.position(key) {
            Some(index) if index + 1 == self.entries.len() => true,
            Some(index) => {
                if let Some(entry) = self.entries.remove(index) {
                    self.entries.push_back(entry);
                }
                true
            }
            None => false,
        }
    }

    /// Removes an entry.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.position(key)?;
        self.entries.remove(index).map(|entry| entry.payload)
    }

    /// Snapshot of keys in LRU to MRU order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.key.clone()).collect()
    }

    /// Iterates entries in LRU to MRU order.
    pub fn iter(&self) -> impl Iterator<Item = &CacheEntry<V>> {
        self.entries.iter()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<V: Clone> RecencyCache<V> {
    /// Finds and promotes in one step, returning a copy of the payload.
    pub fn lookup(&mut self, key: &str) -> Option<V> {
        let payload = self.find(key).cloned()?;
        self.promote(key);
        Some(payload)
    }
}
