//! Unified cache builder for all eviction policies.
//!
//! Provides a single entry point to create caches with different eviction
//! policies behind one concrete type. The policies stay disjoint variants —
//! dispatch is a plain `match`, no trait objects and no inheritance.
//!
//! ## Example
//!
//! ```
//! use evictkit::builder::{CacheBuilder, EvictionPolicy};
//!
//! let mut cache = CacheBuilder::new(100).build::<u64, String>(EvictionPolicy::Lru);
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use std::hash::Hash;

use crate::policy::arc::ArcCache;
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
use crate::policy::lru_k::LrukCache;
use crate::traits::CoreCache;

/// Available eviction policies and their tuning parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionPolicy {
    /// Least Recently Used eviction.
    Lru,
    /// LRU with a K-access admission gate over a bounded history.
    LruK { history_capacity: usize, k: u64 },
    /// Least Frequently Used eviction with average-frequency aging.
    Lfu { max_average: u64 },
    /// Adaptive recency/frequency split with ghost-driven rebalancing.
    Arc { transform_threshold: u64 },
}

/// Builder carrying the shared capacity parameter.
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    /// Starts a builder for caches of the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Builds a cache with the chosen policy.
    pub fn build<K, V>(&self, policy: EvictionPolicy) -> Cache<K, V>
    where
        K: Eq + Hash + Clone,
        V: Clone,
    {
        let inner = match policy {
            EvictionPolicy::Lru => CacheInner::Lru(LruCache::new(self.capacity)),
            EvictionPolicy::LruK {
                history_capacity,
                k,
            } => CacheInner::LruK(LrukCache::with_k(self.capacity, history_capacity, k)),
            EvictionPolicy::Lfu { max_average } => {
                CacheInner::Lfu(LfuCache::with_max_average(self.capacity, max_average))
            }
            EvictionPolicy::Arc {
                transform_threshold,
            } => CacheInner::Arc(ArcCache::with_transform_threshold(
                self.capacity,
                transform_threshold,
            )),
        };
        Cache { inner }
    }
}

/// Policy-agnostic cache handle produced by [`CacheBuilder`].
pub struct Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    inner: CacheInner<K, V>,
}

enum CacheInner<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    Lru(LruCache<K, V>),
    LruK(LrukCache<K, V>),
    Lfu(LfuCache<K, V>),
    Arc(ArcCache<K, V>),
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Inserts or overwrites a key-value pair, returning the previous value
    /// if the key was cached.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        match &mut self.inner {
            CacheInner::Lru(cache) => cache.insert(key, value),
            CacheInner::LruK(cache) => cache.insert(key, value),
            CacheInner::Lfu(cache) => cache.insert(key, value),
            CacheInner::Arc(cache) => cache.insert(key, value),
        }
    }

    /// Looks up a key, updating the policy's access state on a hit.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match &mut self.inner {
            CacheInner::Lru(cache) => cache.get(key),
            CacheInner::LruK(cache) => cache.get(key),
            CacheInner::Lfu(cache) => cache.get(key),
            CacheInner::Arc(cache) => cache.get(key),
        }
    }

    /// Looks up a key, returning `V::default()` on a miss.
    pub fn get_or_default(&mut self, key: &K) -> V
    where
        V: Default,
    {
        self.get(key).cloned().unwrap_or_default()
    }

    /// Returns `true` if the key is cached, without touching access state.
    pub fn contains(&self, key: &K) -> bool {
        match &self.inner {
            CacheInner::Lru(cache) => cache.contains(key),
            CacheInner::LruK(cache) => cache.contains(key),
            CacheInner::Lfu(cache) => cache.contains(key),
            CacheInner::Arc(cache) => cache.contains(key),
        }
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(cache) => cache.len(),
            CacheInner::LruK(cache) => cache.len(),
            CacheInner::Lfu(cache) => cache.len(),
            CacheInner::Arc(cache) => cache.len(),
        }
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(cache) => cache.capacity(),
            CacheInner::LruK(cache) => cache.capacity(),
            CacheInner::Lfu(cache) => cache.capacity(),
            CacheInner::Arc(cache) => cache.capacity(),
        }
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        match &mut self.inner {
            CacheInner::Lru(cache) => cache.clear(),
            CacheInner::LruK(cache) => cache.clear(),
            CacheInner::Lfu(cache) => cache.clear(),
            CacheInner::Arc(cache) => cache.clear(),
        }
    }
}
