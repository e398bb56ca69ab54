//! # Adaptive replacement cache
//!
//! Splits a fixed capacity between a recency half and a frequency half and
//! lets miss traffic move the boundary: every real list is shadowed by a
//! ghost list of recently evicted keys, and a hit on a ghost is evidence
//! that its side was sized too small.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                           ArcCache<K, V>                            │
//! │                                                                     │
//! │   Recency half (T1)                 Frequency half (T2)             │
//! │   ┌─────────────────────────┐       ┌─────────────────────────┐     │
//! │   │ MRU               LRU   │       │ freq buckets, min-freq  │     │
//! │   │  ▼                  ▼   │       │  1: [C]   3: [D] ─ [E]  │     │
//! │   │ [A] ◄──► [B] ◄──► [C]   │       │                         │     │
//! │   │ per-entry access count  │       │ FIFO within a bucket    │     │
//! │   └───────────┬─────────────┘       └────────────┬────────────┘     │
//! │               │ evict                            │ evict            │
//! │               ▼                                  ▼                  │
//! │   ┌─────────────────────────┐       ┌─────────────────────────┐     │
//! │   │ B1 ghosts (keys only)   │       │ B2 ghosts (keys only)   │     │
//! │   └─────────────────────────┘       └─────────────────────────┘     │
//! │                                                                     │
//! │   invariant: cap(T1) + cap(T2) = total capacity                     │
//! └─────────────────────────────────────────────────────────────────────┘
//!
//! Adaptation (on ghost hit, checked before every lookup/insert)
//! ──────────────────────────────────────────────────────────────
//!   hit in B1 → T1 was too small: cap(T2) -= 1 (refused at 0, evicting
//!               from T2 first if full), then cap(T1) += 1
//!   hit in B2 → symmetric
//!
//! Promotion
//! ─────────
//!   A T1 hit bumps the entry's access count; at `transform_threshold` the
//!   value is mirrored into T2, so proven-hot keys live in the frequency
//!   half while T1 keeps absorbing fresh traffic.
//!
//! Insertion
//! ─────────
//!   put(k, v) always lands in T1; unless k was just found in a ghost list,
//!   it is additionally mirrored into T2. A key can therefore be resident
//!   in both halves at once, occupying one slot in each.
//! ```
//!
//! ## Operations
//!
//! | Operation  | Time  | Notes                                         |
//! |------------|-------|-----------------------------------------------|
//! | `get`      | O(1)  | Ghost check + T1 (promote at threshold) + T2  |
//! | `insert`   | O(1)* | *amortized; may evict from either half        |
//! | `contains` | O(1)  | Either half                                   |
//! | `len`      | O(1)  | T1 + T2 entries (dual residents count twice)  |
//! | `clear`    | O(n)  | Resets lists, ghosts and the capacity split   |
//!
//! ## Eviction
//!
//! An overflowing real list evicts at its LRU / minimum-frequency end. The
//! victim's value is dropped, its access count is forgotten, and its key is
//! recorded in that side's ghost list (displacing the oldest ghost when
//! full). Admission to a real list purges the key from both ghost lists, so
//! a side's ghosts never overlap its own residents.
//!
//! ## Thread Safety
//!
//! `ArcCache` is single-threaded (`&mut self`). Use the sharded wrapper for
//! concurrent access.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::frequency_buckets::FrequencyBuckets;
use crate::ds::ghost_list::GhostList;
use crate::ds::recency_list::{EntryRef, RecencyList};
#[cfg(any(test, debug_assertions))]
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::{MetricsSnapshot, PolicyMetrics};
use crate::traits::CoreCache;

/// Default access count at which a recency-half entry is mirrored into the
/// frequency half.
pub const DEFAULT_TRANSFORM_THRESHOLD: u64 = 2;

#[derive(Debug)]
struct RecentEntry<K, V> {
    key: K,
    value: V,
    access_count: u64,
}

/// T1: recency list with per-entry access counters.
#[derive(Debug)]
struct RecencyHalf<K, V> {
    index: FxHashMap<K, EntryRef>,
    list: RecencyList<RecentEntry<K, V>>,
    capacity: usize,
    transform_threshold: u64,
}

impl<K, V> RecencyHalf<K, V>
where
    K: Eq + Hash + Clone,
{
    fn new(capacity: usize, transform_threshold: u64) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            list: RecencyList::with_capacity(capacity),
            capacity,
            transform_threshold,
        }
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Refreshes an entry on hit; returns whether its access count has
    /// reached the transform threshold.
    fn touch(&mut self, key: &K) -> Option<bool> {
        let id = *self.index.get(key)?;
        self.list.move_to_mru(id);
        let entry = self.list.get_mut(id)?;
        entry.access_count += 1;
        Some(entry.access_count >= self.transform_threshold)
    }

    fn update(&mut self, key: &K, value: V) -> Option<V> {
        let id = *self.index.get(key)?;
        self.list.move_to_mru(id);
        self.list
            .get_mut(id)
            .map(|entry| std::mem::replace(&mut entry.value, value))
    }

    /// Admits a fresh entry at the MRU end with access count 1.
    fn admit(&mut self, key: K, value: V) {
        let id = self.list.push_mru(RecentEntry {
            key: key.clone(),
            value,
            access_count: 1,
        });
        self.index.insert(key, id);
    }

    /// Evicts the LRU entry, dropping its value; returns the key.
    fn evict_lru(&mut self) -> Option<K> {
        let entry = self.list.pop_lru()?;
        self.index.remove(&entry.key);
        Some(entry.key)
    }

    fn keys(&self) -> impl Iterator<Item = &K> {
        self.index.keys()
    }

    fn clear(&mut self) {
        self.index.clear();
        self.list.clear();
    }
}

/// T2: frequency buckets plus a value index, no aging.
#[derive(Debug)]
struct FrequencyHalf<K, V> {
    values: FxHashMap<K, V>,
    freqs: FrequencyBuckets<K>,
    capacity: usize,
}

impl<K, V> FrequencyHalf<K, V>
where
    K: Eq + Hash + Clone,
{
    fn new(capacity: usize) -> Self {
        Self {
            values: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            freqs: FrequencyBuckets::new(),
            capacity,
        }
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    fn contains(&self, key: &K) -> bool {
        self.values.contains_key(key)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        if !self.values.contains_key(key) {
            return None;
        }
        self.freqs.touch(key);
        self.values.get(key)
    }

    fn update(&mut self, key: &K, value: V) -> Option<V> {
        let slot = self.values.get_mut(key)?;
        let previous = std::mem::replace(slot, value);
        self.freqs.touch(key);
        Some(previous)
    }

    /// Admits a fresh entry at frequency 1.
    fn admit(&mut self, key: K, value: V) {
        self.freqs.insert(key.clone());
        self.values.insert(key, value);
    }

    /// Evicts the oldest minimum-frequency entry, dropping its value;
    /// returns the key.
    fn evict_min(&mut self) -> Option<K> {
        let (key, _) = self.freqs.pop_min()?;
        self.values.remove(&key);
        Some(key)
    }

    fn keys(&self) -> impl Iterator<Item = &K> {
        self.values.keys()
    }

    fn clear(&mut self) {
        self.values.clear();
        self.freqs.clear();
    }
}

/// Adaptive cache balancing a recency half against a frequency half.
///
/// # Example
///
/// ```
/// use evictkit::policy::arc::ArcCache;
/// use evictkit::traits::CoreCache;
///
/// let mut cache = ArcCache::new(4);
/// cache.insert("page", "content");
/// assert_eq!(cache.get(&"page"), Some(&"content"));
///
/// // The second hit reaches the default transform threshold and mirrors
/// // the entry into the frequency half.
/// cache.get(&"page");
/// assert!(cache.frequent_len() >= 1);
/// ```
///
/// # Capacity adaptation
///
/// ```
/// use evictkit::policy::arc::ArcCache;
/// use evictkit::traits::CoreCache;
///
/// let mut cache: ArcCache<u32, u32> = ArcCache::new(4);
/// assert_eq!(cache.recent_capacity() + cache.frequent_capacity(), 4);
/// ```
pub struct ArcCache<K, V>
where
    K: Eq + Hash + Clone,
{
    recent: RecencyHalf<K, V>,
    frequent: FrequencyHalf<K, V>,
    ghost_recent: GhostList<K>,
    ghost_frequent: GhostList<K>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: PolicyMetrics,
}

impl<K, V> ArcCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an adaptive cache with the default transform threshold
    /// ([`DEFAULT_TRANSFORM_THRESHOLD`]).
    ///
    /// Capacity is split evenly between the halves (the recency half takes
    /// the odd entry); each ghost list can hold up to the total capacity in
    /// keys.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self::with_transform_threshold(capacity, DEFAULT_TRANSFORM_THRESHOLD)
    }

    /// Creates an adaptive cache with an explicit transform threshold.
    ///
    /// The threshold is clamped to at least 1.
    pub fn with_transform_threshold(capacity: usize, transform_threshold: u64) -> Self {
        let frequent_capacity = capacity / 2;
        Self {
            recent: RecencyHalf::new(capacity - frequent_capacity, transform_threshold.max(1)),
            frequent: FrequencyHalf::new(frequent_capacity),
            ghost_recent: GhostList::new(capacity),
            ghost_frequent: GhostList::new(capacity),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: PolicyMetrics::default(),
        }
    }

    /// Returns the configured transform threshold.
    pub fn transform_threshold(&self) -> u64 {
        self.recent.transform_threshold
    }

    /// Returns the number of entries in the recency half (T1).
    pub fn recent_len(&self) -> usize {
        self.recent.len()
    }

    /// Returns the number of entries in the frequency half (T2).
    pub fn frequent_len(&self) -> usize {
        self.frequent.len()
    }

    /// Returns the current capacity of the recency half.
    pub fn recent_capacity(&self) -> usize {
        self.recent.capacity()
    }

    /// Returns the current capacity of the frequency half.
    pub fn frequent_capacity(&self) -> usize {
        self.frequent.capacity()
    }

    /// Returns the number of keys in the recency-side ghost list (B1).
    pub fn ghost_recent_len(&self) -> usize {
        self.ghost_recent.len()
    }

    /// Returns the number of keys in the frequency-side ghost list (B2).
    pub fn ghost_frequent_len(&self) -> usize {
        self.ghost_frequent.len()
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics
            .snapshot(self.recent.len() + self.frequent.len(), self.capacity)
    }

    /// Consults both ghost lists for `key` and rebalances the capacity
    /// split on a hit. Returns whether a ghost was hit (and removed).
    ///
    /// A capacity decrease is refused when the shrinking half is already at
    /// 0; the ghost is still consumed.
    fn check_ghosts(&mut self, key: &K) -> bool {
        if self.ghost_recent.remove(key) {
            // The recency half was too small.
            if self.frequent.capacity() > 0 {
                if self.frequent.len() >= self.frequent.capacity() {
                    if let Some(victim) = self.frequent.evict_min() {
                        self.note_frequent_eviction(victim);
                    }
                }
                self.frequent.set_capacity(self.frequent.capacity() - 1);
                self.recent.set_capacity(self.recent.capacity() + 1);
            }
            return true;
        }

        if self.ghost_frequent.remove(key) {
            // The frequency half was too small.
            if self.recent.capacity() > 0 {
                if self.recent.len() >= self.recent.capacity() {
                    if let Some(victim) = self.recent.evict_lru() {
                        self.note_recent_eviction(victim);
                    }
                }
                self.recent.set_capacity(self.recent.capacity() - 1);
                self.frequent.set_capacity(self.frequent.capacity() + 1);
            }
            return true;
        }

        false
    }

    fn note_recent_eviction(&mut self, victim: K) {
        #[cfg(feature = "metrics")]
        self.metrics.record_eviction();
        self.ghost_recent.record(victim);
    }

    fn note_frequent_eviction(&mut self, victim: K) {
        #[cfg(feature = "metrics")]
        self.metrics.record_eviction();
        self.ghost_frequent.record(victim);
    }

    /// Inserts or overwrites `key` in the recency half.
    ///
    /// Caller must have verified `recent.capacity() > 0`.
    fn recent_store(&mut self, key: K, value: V) -> Option<V> {
        if self.recent.contains(&key) {
            return self.recent.update(&key, value);
        }
        while self.recent.len() >= self.recent.capacity() {
            match self.recent.evict_lru() {
                Some(victim) => self.note_recent_eviction(victim),
                None => break,
            }
        }
        // A resident key must not linger in either ghost list.
        self.ghost_recent.remove(&key);
        self.ghost_frequent.remove(&key);
        self.recent.admit(key, value);
        None
    }

    /// Inserts or overwrites `key` in the frequency half; a no-op while the
    /// half's capacity is adapted down to 0.
    fn frequent_store(&mut self, key: K, value: V) -> Option<V> {
        if self.frequent.capacity() == 0 {
            return None;
        }
        if self.frequent.contains(&key) {
            return self.frequent.update(&key, value);
        }
        while self.frequent.len() >= self.frequent.capacity() {
            match self.frequent.evict_min() {
                Some(victim) => self.note_frequent_eviction(victim),
                None => break,
            }
        }
        self.ghost_recent.remove(&key);
        self.ghost_frequent.remove(&key);
        self.frequent.admit(key, value);
        None
    }

    /// Validates the adaptive invariants; debug/test builds only.
    ///
    /// Checked: the capacity split sums to the total, both halves and both
    /// ghost lists respect their bounds, and no side's ghost list overlaps
    /// its own residents.
    #[cfg(any(test, debug_assertions))]
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.recent.capacity() + self.frequent.capacity() != self.capacity {
            return Err(InvariantError::new(format!(
                "capacity split {} + {} does not sum to {}",
                self.recent.capacity(),
                self.frequent.capacity(),
                self.capacity
            )));
        }
        if self.recent.len() > self.recent.capacity() {
            return Err(InvariantError::new(format!(
                "recency half holds {} entries over capacity {}",
                self.recent.len(),
                self.recent.capacity()
            )));
        }
        if self.frequent.len() > self.frequent.capacity() {
            return Err(InvariantError::new(format!(
                "frequency half holds {} entries over capacity {}",
                self.frequent.len(),
                self.frequent.capacity()
            )));
        }
        if self.ghost_recent.len() > self.ghost_recent.capacity() {
            return Err(InvariantError::new("recency ghost list over capacity"));
        }
        if self.ghost_frequent.len() > self.ghost_frequent.capacity() {
            return Err(InvariantError::new("frequency ghost list over capacity"));
        }
        for key in self.recent.keys() {
            if self.ghost_recent.contains(key) {
                return Err(InvariantError::new(
                    "recency ghost overlaps a recency-half resident",
                ));
            }
        }
        for key in self.frequent.keys() {
            if self.ghost_frequent.contains(key) {
                return Err(InvariantError::new(
                    "frequency ghost overlaps a frequency-half resident",
                ));
            }
        }
        Ok(())
    }
}

impl<K, V> CoreCache<K, V> for ArcCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn get(&mut self, key: &K) -> Option<&V> {
        self.check_ghosts(key);

        if self.recent.contains(key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_hit();

            let promote = self.recent.touch(key).unwrap_or(false);
            if promote {
                if let Some(value) = self.recent.peek(key).cloned() {
                    self.frequent_store(key.clone(), value);
                }
            }
            return self.recent.peek(key);
        }

        if self.frequent.contains(key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_hit();
            return self.frequent.get(key);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_get_miss();
        None
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.capacity == 0 {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_rejected();
            return None;
        }

        let in_ghost = self.check_ghosts(&key);

        if self.recent.capacity() == 0 {
            // The split currently gives everything to the frequency half;
            // the recency half fronts every admission, so the insert is
            // dropped until a recency ghost hit moves capacity back.
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_rejected();
            return None;
        }

        #[cfg(feature = "metrics")]
        {
            if self.recent.contains(&key) || self.frequent.contains(&key) {
                self.metrics.record_insert_update();
            } else {
                self.metrics.record_insert_admission();
            }
        }

        if in_ghost {
            // A ghost hit re-enters through the recency half only.
            return self.recent_store(key, value);
        }

        // Fresh or resident key: always the recency half, mirrored into the
        // frequency half so popular content is warm on both sides.
        let recent_previous = self.recent_store(key.clone(), value.clone());
        let frequent_previous = self.frequent_store(key, value);
        recent_previous.or(frequent_previous)
    }

    fn contains(&self, key: &K) -> bool {
        self.recent.contains(key) || self.frequent.contains(key)
    }

    /// Total entries across both halves; a key resident in both counts
    /// twice, exactly as it occupies two slots.
    fn len(&self) -> usize {
        self.recent.len() + self.frequent.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.recent.clear();
        self.frequent.clear();
        self.ghost_recent.clear();
        self.ghost_frequent.clear();
        let frequent_capacity = self.capacity / 2;
        self.frequent.set_capacity(frequent_capacity);
        self.recent.set_capacity(self.capacity - frequent_capacity);
    }
}

impl<K, V> fmt::Debug for ArcCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArcCache")
            .field("capacity", &self.capacity)
            .field("recent_len", &self.recent.len())
            .field("recent_capacity", &self.recent.capacity())
            .field("frequent_len", &self.frequent.len())
            .field("frequent_capacity", &self.frequent.capacity())
            .field("ghost_recent_len", &self.ghost_recent.len())
            .field("ghost_frequent_len", &self.ghost_frequent.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arc_new_splits_capacity() {
        let cache: ArcCache<u32, u32> = ArcCache::new(4);
        assert_eq!(cache.capacity(), 4);
        assert_eq!(cache.recent_capacity(), 2);
        assert_eq!(cache.frequent_capacity(), 2);
        assert!(cache.is_empty());
        assert_eq!(cache.transform_threshold(), 2);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_odd_capacity_favors_recency() {
        let cache: ArcCache<u32, u32> = ArcCache::new(5);
        assert_eq!(cache.recent_capacity(), 3);
        assert_eq!(cache.frequent_capacity(), 2);
    }

    #[test]
    fn arc_insert_mirrors_into_both_halves() {
        let mut cache = ArcCache::new(4);
        cache.insert("a", 1);

        assert_eq!(cache.recent_len(), 1);
        assert_eq!(cache.frequent_len(), 1);
        assert_eq!(cache.get(&"a"), Some(&1));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_threshold_hit_promotes_value() {
        let mut cache = ArcCache::with_transform_threshold(6, 3);
        cache.insert(1, "v");

        // The mirror copy starts in the frequency half; the promotion path
        // refreshes it once the access count reaches the threshold.
        cache.get(&1);
        cache.get(&1); // count reaches 3
        assert!(cache.contains(&1));
        assert_eq!(cache.frequent_len(), 1);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_eviction_records_ghost() {
        let mut cache = ArcCache::new(4);
        for key in ["a", "b", "c", "d", "e"] {
            cache.insert(key, 1);
        }

        // Five inserts through a two-slot recency half: the early keys fell
        // off the LRU end into the recency ghost list.
        assert!(cache.ghost_recent_len() > 0);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_recency_ghost_hit_grows_recency_half() {
        let mut cache = ArcCache::new(4);
        for key in ["a", "b", "c", "d", "e"] {
            cache.insert(key, 1);
        }
        // "a" was evicted from the recency half into B1.
        let recent_before = cache.recent_capacity();
        let frequent_before = cache.frequent_capacity();

        cache.insert("a", 2);

        assert_eq!(cache.recent_capacity(), recent_before + 1);
        assert_eq!(cache.frequent_capacity(), frequent_before - 1);
        assert!(cache.contains(&"a"));
        assert_eq!(
            cache.recent_capacity() + cache.frequent_capacity(),
            cache.capacity()
        );
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_ghost_hit_is_a_miss() {
        let mut cache = ArcCache::new(4);
        for key in ["a", "b", "c", "d", "e"] {
            cache.insert(key, 1);
        }
        assert!(cache.ghost_recent_len() > 0);

        // A ghost holds no value: the lookup adapts but misses.
        let ghosted = ["a", "b", "c"]
            .iter()
            .find(|k| !cache.contains(*k))
            .copied()
            .unwrap();
        assert_eq!(cache.get(&ghosted), None);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_capacity_split_is_conserved() {
        let mut cache = ArcCache::new(6);
        for i in 0..40u32 {
            cache.insert(i % 11, i);
            cache.get(&(i % 7));
            assert_eq!(
                cache.recent_capacity() + cache.frequent_capacity(),
                cache.capacity()
            );
            cache.check_invariants().unwrap();
        }
    }

    #[test]
    fn arc_decrease_refused_at_zero() {
        let mut cache = ArcCache::new(1);
        // Split is 1/0: the frequency half cannot shrink further, so a
        // recency ghost hit must not grow the recency half.
        cache.insert("a", 1);
        cache.insert("b", 2); // evicts "a" into B1
        assert!(cache.ghost_recent_len() > 0);

        cache.insert("a", 3);
        assert_eq!(cache.recent_capacity(), 1);
        assert_eq!(cache.frequent_capacity(), 0);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_overwrite_returns_previous_value() {
        let mut cache = ArcCache::new(4);
        cache.insert("k", 1);
        assert_eq!(cache.insert("k", 2), Some(1));
        assert_eq!(cache.get(&"k"), Some(&2));
    }

    #[test]
    fn arc_zero_capacity_rejects_inserts() {
        let mut cache = ArcCache::new(0);
        cache.insert("k", 1);
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.get(&"k"), None);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_clear_resets_split_and_ghosts() {
        let mut cache = ArcCache::new(4);
        for key in ["a", "b", "c", "d", "e"] {
            cache.insert(key, 1);
        }
        cache.insert("a", 1); // ghost hit shifts the split

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.recent_capacity(), 2);
        assert_eq!(cache.frequent_capacity(), 2);
        assert_eq!(cache.ghost_recent_len(), 0);
        assert_eq!(cache.ghost_frequent_len(), 0);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn arc_ghosts_never_overlap_own_residents() {
        let mut cache = ArcCache::new(4);
        for i in 0..50u32 {
            cache.insert(i % 9, i);
            cache.get(&(i % 5));
            cache.check_invariants().unwrap();
        }
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn arc_metrics_snapshot_counts() {
        let mut cache = ArcCache::new(4);
        cache.insert(1, "a");
        cache.get(&1);
        cache.get(&99);

        let snap = cache.metrics_snapshot();
        assert_eq!(snap.insert_admissions, 1);
        assert_eq!(snap.get_hits, 1);
        assert_eq!(snap.get_misses, 1);
    }
}
