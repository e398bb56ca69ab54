//! # LRU-K cache: admission-gated LRU
//!
//! A plain LRU main cache protected by an admission history: a key must be
//! seen K times before it earns a slot in main. One-shot scans burn their
//! accesses in the history and never displace the resident working set.
//!
//! ## Architecture
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────────────┐
//!   │                         LrukCache<K, V>                           │
//!   │                                                                   │
//!   │   main: LruCache<K, V>          history: LruCache<K, u64>         │
//!   │   (admitted entries)            (key → access count, bounded LRU) │
//!   │                                                                   │
//!   │                                 pending: FxHashMap<K, V>          │
//!   │                                 (values seen by rejected puts,    │
//!   │                                  keyed like the history)          │
//!   └───────────────────────────────────────────────────────────────────┘
//!
//!   access(k) when k ∉ main:
//!     1. history[k] += 1   (created at 1; LRU-bounded, evictions drop
//!                           the matching pending value)
//!     2. history[k] ≥ K and a pending value exists
//!          → admit (k, pending[k]) into main, forget history entry
//! ```
//!
//! The history contains only keys that are *not* in main: admission removes
//! the entry, and accesses to main-resident keys never touch it.
//!
//! ## Operations
//!
//! | Method         | Behavior                                            |
//! |----------------|-----------------------------------------------------|
//! | `insert(k, v)` | k in main → overwrite + MRU. Else count an access;  |
//! |                | at K admit, below K stash `v` as pending            |
//! | `get(k)`       | k in main → hit + MRU. Else count an access; at K   |
//! |                | admit the stashed value (and report the hit), else  |
//! |                | miss                                                |
//! | `access_count` | history counter for a not-yet-admitted key          |
//!
//! ## Thread Safety
//!
//! `LrukCache` is single-threaded (`&mut self`). Use the sharded wrapper
//! for concurrent access.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::ConfigError;
#[cfg(feature = "metrics")]
use crate::metrics::MetricsSnapshot;
use crate::policy::lru::LruCache;
use crate::traits::{CoreCache, LruCacheTrait, LrukCacheTrait, MutableCache};

/// Default admission threshold.
pub const DEFAULT_K: u64 = 2;

/// LRU cache with a K-access admission gate.
///
/// # Example
///
/// ```
/// use evictkit::policy::lru_k::LrukCache;
/// use evictkit::traits::CoreCache;
///
/// let mut cache = LrukCache::with_k(2, 8, 3);
///
/// // Two accesses are not enough for admission.
/// cache.insert(1, "value");
/// cache.get(&1);
/// assert!(!cache.contains(&1));
///
/// // The third access admits the stashed value.
/// assert_eq!(cache.get(&1), Some(&"value"));
/// assert!(cache.contains(&1));
/// ```
pub struct LrukCache<K, V>
where
    K: Eq + Hash + Clone,
{
    main: LruCache<K, V>,
    history: LruCache<K, u64>,
    pending: FxHashMap<K, V>,
    k: u64,
}

impl<K, V> LrukCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LRU-K cache with the default threshold ([`DEFAULT_K`]).
    ///
    /// `history_capacity` bounds the admission history independently of the
    /// main capacity.
    #[inline]
    pub fn new(capacity: usize, history_capacity: usize) -> Self {
        Self::with_k(capacity, history_capacity, DEFAULT_K)
    }

    /// Creates an LRU-K cache with an explicit admission threshold.
    ///
    /// `k` is clamped to at least 2 (K = 1 degenerates to plain LRU).
    pub fn with_k(capacity: usize, history_capacity: usize, k: u64) -> Self {
        Self {
            main: LruCache::new(capacity),
            history: LruCache::new(history_capacity),
            pending: FxHashMap::default(),
            k: k.max(2),
        }
    }

    /// Fallible constructor rejecting thresholds below 2.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::policy::lru_k::LrukCache;
    ///
    /// assert!(LrukCache::<u64, u64>::try_with_k(100, 50, 2).is_ok());
    /// assert!(LrukCache::<u64, u64>::try_with_k(100, 50, 1).is_err());
    /// ```
    pub fn try_with_k(
        capacity: usize,
        history_capacity: usize,
        k: u64,
    ) -> Result<Self, ConfigError> {
        if k < 2 {
            return Err(ConfigError::new("k must be >= 2"));
        }
        Ok(Self::with_k(capacity, history_capacity, k))
    }

    /// Returns the history capacity.
    pub fn history_capacity(&self) -> usize {
        self.history.capacity()
    }

    /// Counters of the backing main cache.
    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.main.metrics_snapshot()
    }

    /// Counts one access for a key outside main. Returns the new count.
    ///
    /// The history is itself a bounded LRU; before it would overflow, its
    /// LRU entry is dropped together with any pending value stashed for it.
    fn count_access(&mut self, key: &K) -> u64 {
        let count = self.history.peek(key).copied().unwrap_or(0) + 1;
        if !self.history.contains(key) && self.history.len() >= self.history.capacity() {
            if let Some((dropped, _)) = self.history.pop_lru() {
                self.pending.remove(&dropped);
            }
        }
        self.history.insert(key.clone(), count);
        count
    }

    fn admit(&mut self, key: K, value: V) -> Option<V> {
        self.history.remove(&key);
        self.pending.remove(&key);
        self.main.insert(key, value)
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        for key in self.pending.keys() {
            assert!(self.history.contains(key));
            assert!(!self.main.contains(key));
        }
        self.main.debug_validate_invariants();
        self.history.debug_validate_invariants();
    }
}

impl<K, V> CoreCache<K, V> for LrukCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        // A main-resident key is just overwritten; the history only tracks
        // keys outside main.
        if self.main.contains(&key) {
            return self.main.insert(key, value);
        }

        let count = self.count_access(&key);
        if count >= self.k {
            self.admit(key, value)
        } else {
            if self.history.contains(&key) {
                self.pending.insert(key, value);
            }
            None
        }
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        if self.main.contains(key) {
            return self.main.get(key);
        }

        let count = self.count_access(key);
        if count >= self.k {
            if let Some(value) = self.pending.remove(key) {
                self.history.remove(key);
                self.main.insert(key.clone(), value);
                return self.main.get(key);
            }
        }
        None
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.main.contains(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.main.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.main.capacity()
    }

    fn clear(&mut self) {
        self.main.clear();
        self.history.clear();
        self.pending.clear();
    }
}

impl<K, V> LrukCacheTrait<K, V> for LrukCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn k_value(&self) -> u64 {
        self.k
    }

    fn access_count(&self, key: &K) -> Option<u64> {
        self.history.peek(key).copied()
    }
}

impl<K, V> fmt::Debug for LrukCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LrukCache")
            .field("len", &self.main.len())
            .field("capacity", &self.main.capacity())
            .field("k", &self.k)
            .field("history_len", &self.history.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lruk_put_below_threshold_does_not_admit() {
        let mut cache = LrukCache::with_k(2, 8, 3);
        cache.insert(1, "v");
        assert!(!cache.contains(&1));
        assert_eq!(cache.access_count(&1), Some(1));
        cache.debug_validate_invariants();
    }

    #[test]
    fn lruk_kth_access_admits_stashed_value() {
        let mut cache = LrukCache::with_k(2, 8, 3);
        cache.insert(1, "v");
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.access_count(&1), Some(2));

        // Third access reaches K and admits the value stashed by the put.
        assert_eq!(cache.get(&1), Some(&"v"));
        assert!(cache.contains(&1));
        assert_eq!(cache.access_count(&1), None);
        cache.debug_validate_invariants();
    }

    #[test]
    fn lruk_gets_alone_never_admit() {
        let mut cache: LrukCache<u32, &str> = LrukCache::with_k(2, 8, 2);
        for _ in 0..5 {
            assert_eq!(cache.get(&1), None);
        }
        // No value was ever offered, so there is nothing to admit.
        assert!(!cache.contains(&1));
        cache.debug_validate_invariants();
    }

    #[test]
    fn lruk_repeated_puts_reach_threshold() {
        let mut cache = LrukCache::with_k(2, 8, 3);
        cache.insert(1, "v1");
        cache.insert(1, "v2");
        assert!(!cache.contains(&1));

        // The third put admits, carrying the latest value.
        cache.insert(1, "v3");
        assert!(cache.contains(&1));
        assert_eq!(cache.get(&1), Some(&"v3"));
    }

    #[test]
    fn lruk_overwrites_resident_key_without_history() {
        let mut cache = LrukCache::with_k(2, 8, 2);
        cache.insert(1, "v1");
        cache.insert(1, "v2"); // admitted at the second access

        assert!(cache.contains(&1));
        assert_eq!(cache.insert(1, "v3"), Some("v2"));
        assert_eq!(cache.access_count(&1), None);
        cache.debug_validate_invariants();
    }

    #[test]
    fn lruk_main_follows_lru_eviction() {
        let mut cache = LrukCache::with_k(2, 8, 2);
        for key in [1, 2, 3] {
            cache.insert(key, key);
            cache.insert(key, key);
        }

        // Capacity 2: admitting 3 evicted the least recent resident (1).
        assert!(!cache.contains(&1));
        assert!(cache.contains(&2));
        assert!(cache.contains(&3));
    }

    #[test]
    fn lruk_history_eviction_drops_pending_value() {
        let mut cache = LrukCache::with_k(4, 2, 3);
        cache.insert(1, "a");
        cache.insert(2, "b");
        // History capacity 2: tracking key 3 drops key 1's trace.
        cache.insert(3, "c");

        assert_eq!(cache.access_count(&1), None);
        cache.debug_validate_invariants();

        // Key 1 starts over; two more accesses are needed again.
        cache.insert(1, "a");
        assert_eq!(cache.access_count(&1), Some(1));
        assert!(!cache.contains(&1));
    }

    #[test]
    fn lruk_k_is_clamped_and_validated() {
        let cache: LrukCache<u32, u32> = LrukCache::with_k(10, 10, 0);
        assert_eq!(cache.k_value(), 2);

        assert!(LrukCache::<u32, u32>::try_with_k(10, 10, 1).is_err());
        let cache = LrukCache::<u32, u32>::try_with_k(10, 10, 4).unwrap();
        assert_eq!(cache.k_value(), 4);
    }

    #[test]
    fn lruk_zero_capacity_rejects_everything() {
        let mut cache = LrukCache::with_k(0, 8, 2);
        cache.insert(1, "v");
        cache.insert(1, "v");
        cache.insert(1, "v");
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.get(&1), None);
    }

    #[test]
    fn lruk_clear_resets_all_state() {
        let mut cache = LrukCache::with_k(2, 8, 2);
        cache.insert(1, "a");
        cache.insert(1, "a");
        cache.insert(2, "b");

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.access_count(&2), None);

        // After a clear the admission gate starts over.
        cache.insert(1, "a");
        assert!(!cache.contains(&1));
        cache.debug_validate_invariants();
    }
}
