//! Keyed memo map with optional least-recently-used bound.

use serde::{Deserialize, Serialize};
use lru::LruCache;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::Hash;
use std::num::NonZeroUsize;

/// Retention policy for caching proxies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// `None` keeps every entry until invalidated.
    pub max_entries: Option<usize>,
    /// Whether "not found" answers are memoized like found ones.
    pub cache_missing: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: None,
            cache_missing: true,
        }
    }
}

impl CacheConfig {
    pub fn bounded(max_entries: usize) -> Self {
        Self {
            max_entries: Some(max_entries),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), CacheConfigError> {
        match self.max_entries {
            Some(max) if NonZeroUsize::new(max).is_none() => Err(CacheConfigError::ZeroCapacity),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheConfigError {
    ZeroCapacity,
}

impl Display for CacheConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroCapacity => write!(f, "cache max_entries must be at least 1"),
        }
    }
}

impl Error for CacheConfigError {}

/// Counters describing cache effectiveness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Delegations to the wrapped source, failed ones included.
    pub source_calls: u64,
    pub evictions: u64,
}

/// Result of offering a freshly computed value to the memo map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertOutcome<K, V> {
    /// The value now stored for the key: the offered one, or the earlier
    /// winner when the key was already populated.
    pub canonical: V,
    pub inserted: bool,
    pub evicted: Option<K>,
}

/// Memo map; the first value stored for a key wins.
#[derive(Debug)]
pub struct MemoCache<K: Hash + Eq, V> {
    entries: LruCache<K, V>,
}

impl<K, V> MemoCache<K, V>
where
    K: Hash + Eq,
    V: Clone,
{
    /// Builds a memo map holding at most `max_entries` keys, or any number
    /// when `None`.
    ///
    /// # Errors
    /// - `ZeroCapacity` when `max_entries == Some(0)`.
    pub fn new(max_entries: Option<usize>) -> Result<Self, CacheConfigError> {
        match max_entries {
            None => Ok(Self::unbounded()),
            Some(max) => {
                let capacity = NonZeroUsize::new(max).ok_or(CacheConfigError::ZeroCapacity)?;
                Ok(Self {
                    entries: LruCache::new(capacity),
                })
            }
        }
    }

    pub fn unbounded() -> Self {
        Self {
            entries: LruCache::unbounded(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Membership check that leaves recency untouched.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains(key)
    }

    /// Returns a copy of the stored value and marks the key as recently used.
    pub fn get(&mut self, key: &K) -> Option<V> {
        self.entries.get(key).cloned()
    }

    /// Stores `value` unless `key` is already populated.
    pub fn insert_if_absent(&mut self, key: K, value: V) -> InsertOutcome<K, V> {
        if let Some(existing) = self.get(&key) {
            return InsertOutcome {
                canonical: existing,
                inserted: false,
                evicted: None,
            };
        }

        // The key is absent, so a returned pair is always a capacity eviction.
        let evicted = self
            .entries
            .push(key, value.clone())
            .map(|(evicted_key, _)| evicted_key);

        InsertOutcome {
            canonical: value,
            inserted: true,
            evicted,
        }
    }

    pub fn remove(&mut self, key: &K) -> bool {
        self.entries.pop(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
