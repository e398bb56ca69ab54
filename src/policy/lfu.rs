//! # Least Frequently Used (LFU) cache with aging
//!
//! Per-frequency FIFO buckets + hash index: the victim is the oldest entry
//! in the lowest non-empty frequency bucket. A periodic aging pass halves
//! historical frequencies so keys that were hot long ago cannot squat in the
//! cache forever.
//!
//! ## Architecture
//!
//! ```text
//!   ┌────────────────────────────────────────────────────────────────────┐
//!   │                          LfuCache<K, V>                            │
//!   │                                                                    │
//!   │   values: FxHashMap<K, V>          freqs: FrequencyBuckets<K>      │
//!   │                                                                    │
//!   │   ┌─────────┬─────────┐            freq 1: [B] ─ [C]   ◄─ min      │
//!   │   │   Key   │  Value  │            freq 3: [A]                     │
//!   │   │   A     │   ...   │            freq 7: [D] ─ [E]               │
//!   │   │   B     │   ...   │                                            │
//!   │   │   ...   │   ...   │            buckets chained in ascending    │
//!   │   └─────────┴─────────┘            frequency order                 │
//!   │                                                                    │
//!   │   aging counters: total_freq, max_average                          │
//!   └────────────────────────────────────────────────────────────────────┘
//!
//!   get(B):  detach B from bucket 1, freq → 2, attach to bucket 2's FIFO
//!            tail; bucket 1 still holds [C], so min stays 1
//!   evict:   pop the oldest entry of the min bucket (FIFO tie-break)
//! ```
//!
//! ## Aging
//!
//! Every frequency increment adds 1 to `total_freq`. When the integer
//! average `total_freq / len` exceeds `max_average`, every entry's frequency
//! drops by `max_average / 2` (clamped to 1), all entries are re-bucketed
//! with their relative age preserved, and `total_freq` is recomputed from
//! the new frequencies. The pass is O(len) but runs at most once per
//! `max_average × len` frequency increments.
//!
//! ## Operations
//!
//! | Method       | Complexity    | Description                           |
//! |--------------|---------------|---------------------------------------|
//! | `insert`     | O(1) avg      | Insert or overwrite (+ freq bump)     |
//! | `get`        | O(1) avg      | Lookup + freq bump                    |
//! | `pop_lfu`    | O(1) avg      | Remove and return the LFU entry       |
//! | `peek_lfu`   | O(1) avg      | Inspect the LFU entry                 |
//! | `frequency`  | O(1) avg      | Current frequency of a key            |
//! | `purge`      | O(n)          | Empty index + buckets, keep instance  |
//! | aging pass   | O(n), amortized O(1) per access                       |
//!
//! ## Thread Safety
//!
//! `LfuCache` is single-threaded (`&mut self`). Use the sharded wrapper for
//! concurrent access.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::frequency_buckets::FrequencyBuckets;
use crate::error::ConfigError;
#[cfg(feature = "metrics")]
use crate::metrics::{MetricsSnapshot, PolicyMetrics};
use crate::traits::{CoreCache, LfuCacheTrait};

/// Default aging threshold: age-down runs when the average frequency
/// exceeds this.
pub const DEFAULT_MAX_AVERAGE: u64 = 10;

/// Least Frequently Used cache with average-frequency aging.
///
/// Evicts the oldest entry of the lowest-frequency bucket. New entries start
/// at frequency 1; every hit adds 1.
///
/// # Example
///
/// ```
/// use evictkit::policy::lfu::LfuCache;
/// use evictkit::traits::CoreCache;
///
/// let mut cache = LfuCache::new(2);
/// cache.insert("a", 1);
/// cache.get(&"a");
/// cache.get(&"a");
/// cache.insert("b", 2);
///
/// // "b" (freq 1) loses to "a" (freq 3) when "c" needs a slot.
/// cache.insert("c", 3);
/// assert_eq!(cache.get(&"a"), Some(&1));
/// assert_eq!(cache.get(&"b"), None);
/// assert_eq!(cache.get(&"c"), Some(&3));
/// ```
pub struct LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    values: FxHashMap<K, V>,
    freqs: FrequencyBuckets<K>,
    capacity: usize,
    max_average: u64,
    total_freq: u64,
    #[cfg(feature = "metrics")]
    metrics: PolicyMetrics,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LFU cache with the default aging threshold
    /// ([`DEFAULT_MAX_AVERAGE`]).
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self::with_max_average(capacity, DEFAULT_MAX_AVERAGE)
    }

    /// Creates an LFU cache with an explicit aging threshold.
    ///
    /// `max_average` is clamped to at least 1.
    pub fn with_max_average(capacity: usize, max_average: u64) -> Self {
        Self {
            values: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            freqs: FrequencyBuckets::new(),
            capacity,
            max_average: max_average.max(1),
            total_freq: 0,
            #[cfg(feature = "metrics")]
            metrics: PolicyMetrics::default(),
        }
    }

    /// Fallible constructor rejecting a zero aging threshold.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::policy::lfu::LfuCache;
    ///
    /// assert!(LfuCache::<u64, u64>::try_with_max_average(100, 5).is_ok());
    /// assert!(LfuCache::<u64, u64>::try_with_max_average(100, 0).is_err());
    /// ```
    pub fn try_with_max_average(capacity: usize, max_average: u64) -> Result<Self, ConfigError> {
        if max_average == 0 {
            return Err(ConfigError::new("max_average must be >= 1"));
        }
        Ok(Self::with_max_average(capacity, max_average))
    }

    /// Returns the configured aging threshold.
    pub fn max_average(&self) -> u64 {
        self.max_average
    }

    /// Returns the current integer average frequency (0 when empty).
    pub fn average_frequency(&self) -> u64 {
        let len = self.values.len() as u64;
        if len == 0 { 0 } else { self.total_freq / len }
    }

    /// Empties the index and every frequency bucket without consuming the
    /// instance; capacity and aging threshold are retained.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::policy::lfu::LfuCache;
    /// use evictkit::traits::CoreCache;
    ///
    /// let mut cache = LfuCache::new(4);
    /// cache.insert(1, "a");
    /// cache.insert(2, "b");
    ///
    /// cache.purge();
    /// assert!(cache.is_empty());
    /// assert_eq!(cache.capacity(), 4);
    /// ```
    pub fn purge(&mut self) {
        self.values.clear();
        self.freqs.clear();
        self.total_freq = 0;
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot(self.values.len(), self.capacity)
    }

    /// Records one frequency increment for `key` and runs the aging check.
    fn bump_frequency(&mut self, key: &K) {
        if self.freqs.touch(key).is_some() {
            self.total_freq += 1;
            self.age_if_needed();
        }
    }

    fn age_if_needed(&mut self) {
        let len = self.values.len() as u64;
        if len == 0 {
            return;
        }
        if self.total_freq / len > self.max_average {
            self.total_freq = self.freqs.age_down(self.max_average / 2);
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(self.values.len() <= self.capacity);
        assert_eq!(self.values.len(), self.freqs.len());
        for key in self.values.keys() {
            assert!(self.freqs.contains(key));
        }
        if !self.values.is_empty() {
            assert!(self.total_freq >= self.values.len() as u64);
        }
        self.freqs.debug_validate_invariants();
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.capacity == 0 {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_rejected();
            return None;
        }

        if let Some(slot) = self.values.get_mut(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let previous = std::mem::replace(slot, value);
            // Overwrite counts as an access.
            self.bump_frequency(&key);
            return Some(previous);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_admission();

        if self.values.len() >= self.capacity && self.pop_lfu().is_some() {
            #[cfg(feature = "metrics")]
            self.metrics.record_eviction();
        }

        self.freqs.insert(key.clone());
        self.values.insert(key, value);
        self.total_freq += 1;
        self.age_if_needed();
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        if !self.values.contains_key(key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.bump_frequency(key);
        self.values.get(key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.values.contains_key(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.purge();
    }
}

impl<K, V> LfuCacheTrait<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lfu(&mut self) -> Option<(K, V)> {
        let (key, freq) = self.freqs.pop_min()?;
        self.total_freq = self.total_freq.saturating_sub(freq);
        let value = self.values.remove(&key)?;
        Some((key, value))
    }

    fn peek_lfu(&self) -> Option<(&K, &V)> {
        let (key, _) = self.freqs.peek_min()?;
        let value = self.values.get(key)?;
        Some((key, value))
    }

    fn frequency(&self, key: &K) -> Option<u64> {
        self.freqs.frequency(key)
    }
}

impl<K, V> fmt::Debug for LfuCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCache")
            .field("len", &self.values.len())
            .field("capacity", &self.capacity)
            .field("max_average", &self.max_average)
            .field("average_frequency", &self.average_frequency())
            .finish_non_exhaustive()
    }
}
