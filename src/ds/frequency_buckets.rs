//! Frequency-ordered buckets of keys for LFU-style policies.
//!
//! Each observed frequency owns a FIFO of keys; within a bucket the oldest
//! arrival is the eviction candidate. Two structural choices keep this
//! simple:
//!
//! - Keys are woven into their bucket's chain *by key*: the hash map that
//!   answers membership also stores each key's frequency and its two bucket
//!   neighbors. No arena, no handles.
//! - Buckets live in a `BTreeMap` keyed by frequency, so the minimum
//!   frequency is the map's first key. There is no min-freq counter to keep
//!   in sync across promotions, evictions and aging; bucket operations pay
//!   O(log B) for B distinct frequencies instead.
//!
//! ```text
//!   buckets: BTreeMap<u64, BucketEnds<K>>        index: FxHashMap<K, meta>
//!
//!   1 ─► { oldest: "b", newest: "c" }            "b": freq 1, newer: "c"
//!   3 ─► { oldest: "a", newest: "a" }            "c": freq 1, older: "b"
//!   ▲                                            "a": freq 3
//!   └─ first key = minimum frequency
//! ```
//!
//! `age_down` re-buckets every key after the periodic aging pass, keeping
//! relative age order.

use std::collections::BTreeMap;
use std::hash::Hash;

use rustc_hash::FxHashMap;

#[derive(Debug)]
struct EntryMeta<K> {
    freq: u64,
    newer: Option<K>,
    older: Option<K>,
}

/// Both ends of one bucket's FIFO chain; buckets are never empty.
#[derive(Debug)]
struct BucketEnds<K> {
    newest: K,
    oldest: K,
}

/// Map from frequency to a FIFO bucket of keys, minimum frequency first.
///
/// Values are not stored here; policies keep them in their own index and use
/// this structure purely for eviction order.
#[derive(Debug)]
pub struct FrequencyBuckets<K> {
    index: FxHashMap<K, EntryMeta<K>>,
    buckets: BTreeMap<u64, BucketEnds<K>>,
}

impl<K> FrequencyBuckets<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            index: FxHashMap::default(),
            buckets: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the current frequency of `key`, if tracked.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.index.get(key).map(|meta| meta.freq)
    }

    /// Returns the smallest frequency with a non-empty bucket.
    pub fn min_freq(&self) -> Option<u64> {
        self.buckets.keys().next().copied()
    }

    /// Returns the oldest key in the minimum-frequency bucket, with its
    /// frequency, without removing it.
    pub fn peek_min(&self) -> Option<(&K, u64)> {
        let (_, ends) = self.buckets.iter().next()?;
        let (key, meta) = self.index.get_key_value(&ends.oldest)?;
        Some((key, meta.freq))
    }

    /// Tracks `key` with frequency 1; returns `false` if already tracked.
    pub fn insert(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        self.chain(key, 1);
        true
    }

    /// Bumps the frequency of `key` by one, moving it to the next bucket.
    ///
    /// Returns the new frequency. Saturates at `u64::MAX` (the entry is then
    /// only refreshed within its bucket).
    pub fn touch(&mut self, key: &K) -> Option<u64> {
        let meta = self.unchain(key)?;
        let bumped = meta.freq.saturating_add(1);
        self.chain(key.clone(), bumped);
        Some(bumped)
    }

    /// Removes and returns the oldest key in the minimum-frequency bucket.
    pub fn pop_min(&mut self) -> Option<(K, u64)> {
        let victim = {
            let (_, ends) = self.buckets.iter().next()?;
            ends.oldest.clone()
        };
        let meta = self.unchain(&victim)?;
        Some((victim, meta.freq))
    }

    /// Subtracts `decrement` from every tracked frequency (clamped to 1) and
    /// re-buckets all keys, preserving relative age order.
    ///
    /// Returns the sum of the new frequencies so callers can reset their
    /// aging totals.
    pub fn age_down(&mut self, decrement: u64) -> u64 {
        if self.index.is_empty() {
            return 0;
        }

        // Oldest keys first within each bucket, buckets in ascending order,
        // so entries merged into one bucket keep their relative age.
        let mut ordered = Vec::with_capacity(self.index.len());
        for ends in self.buckets.values() {
            let mut cursor = Some(ends.oldest.clone());
            while let Some(key) = cursor {
                cursor = self
                    .index
                    .get(&key)
                    .and_then(|meta| meta.newer.clone());
                ordered.push(key);
            }
        }

        self.buckets.clear();
        let mut total = 0u64;
        for key in ordered {
            let aged = match self.index.remove(&key) {
                Some(meta) => meta.freq.saturating_sub(decrement).max(1),
                None => continue,
            };
            self.chain(key, aged);
            total += aged;
        }
        total
    }

    /// Forgets all keys and buckets.
    pub fn clear(&mut self) {
        self.index.clear();
        self.buckets.clear();
    }

    /// Appends `key` at the newest end of bucket `freq`, creating the
    /// bucket if needed.
    fn chain(&mut self, key: K, freq: u64) {
        match self.buckets.get_mut(&freq) {
            Some(ends) => {
                let displaced = std::mem::replace(&mut ends.newest, key.clone());
                if let Some(meta) = self.index.get_mut(&displaced) {
                    meta.newer = Some(key.clone());
                }
                self.index.insert(
                    key,
                    EntryMeta {
                        freq,
                        newer: None,
                        older: Some(displaced),
                    },
                );
            }
            None => {
                self.buckets.insert(
                    freq,
                    BucketEnds {
                        newest: key.clone(),
                        oldest: key.clone(),
                    },
                );
                self.index.insert(
                    key,
                    EntryMeta {
                        freq,
                        newer: None,
                        older: None,
                    },
                );
            }
        }
    }

    /// Removes `key` from its bucket chain and the index, dropping the
    /// bucket when it empties.
    fn unchain(&mut self, key: &K) -> Option<EntryMeta<K>> {
        let meta = self.index.remove(key)?;
        match (&meta.newer, &meta.older) {
            (None, None) => {
                self.buckets.remove(&meta.freq);
            }
            (Some(newer), None) => {
                if let Some(neighbor) = self.index.get_mut(newer) {
                    neighbor.older = None;
                }
                if let Some(ends) = self.buckets.get_mut(&meta.freq) {
                    ends.oldest = newer.clone();
                }
            }
            (None, Some(older)) => {
                if let Some(neighbor) = self.index.get_mut(older) {
                    neighbor.newer = None;
                }
                if let Some(ends) = self.buckets.get_mut(&meta.freq) {
                    ends.newest = older.clone();
                }
            }
            (Some(newer), Some(older)) => {
                if let Some(neighbor) = self.index.get_mut(newer) {
                    neighbor.older = Some(older.clone());
                }
                if let Some(neighbor) = self.index.get_mut(older) {
                    neighbor.newer = Some(newer.clone());
                }
            }
        }
        Some(meta)
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let mut counted = 0usize;
        for (&freq, ends) in &self.buckets {
            let mut older: Option<&K> = None;
            let mut cursor = Some(&ends.oldest);
            while let Some(key) = cursor {
                let meta = self.index.get(key).expect("bucket key missing from index");
                assert_eq!(meta.freq, freq);
                assert!(meta.older.as_ref() == older);
                if meta.newer.is_none() {
                    assert!(&ends.newest == key);
                }
                counted += 1;
                assert!(counted <= self.index.len(), "cycle in bucket chain");
                older = Some(key);
                cursor = meta.newer.as_ref();
            }
        }
        assert_eq!(counted, self.index.len());
        if self.index.is_empty() {
            assert!(self.buckets.is_empty());
        }
    }
}

impl<K> Default for FrequencyBuckets<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_buckets_basic_flow() {
        let mut buckets = FrequencyBuckets::new();
        assert!(buckets.insert("a"));
        assert!(buckets.insert("b"));

        assert_eq!(buckets.frequency(&"a"), Some(1));
        assert_eq!(buckets.min_freq(), Some(1));

        assert_eq!(buckets.touch(&"a"), Some(2));
        assert_eq!(buckets.frequency(&"a"), Some(2));
        assert_eq!(buckets.min_freq(), Some(1));

        assert_eq!(buckets.pop_min(), Some(("b", 1)));
        assert_eq!(buckets.min_freq(), Some(2));
    }

    #[test]
    fn frequency_buckets_duplicate_insert_is_noop() {
        let mut buckets = FrequencyBuckets::new();
        assert!(buckets.insert("a"));
        assert!(!buckets.insert("a"));
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets.frequency(&"a"), Some(1));
    }

    #[test]
    fn frequency_buckets_touch_missing_returns_none() {
        let mut buckets: FrequencyBuckets<&str> = FrequencyBuckets::new();
        assert_eq!(buckets.touch(&"missing"), None);
        assert_eq!(buckets.min_freq(), None);
        assert!(buckets.is_empty());
    }

    #[test]
    fn frequency_buckets_fifo_within_same_frequency() {
        let mut buckets = FrequencyBuckets::new();
        buckets.insert("a");
        buckets.insert("b");
        buckets.insert("c");

        assert_eq!(buckets.pop_min(), Some(("a", 1)));
        assert_eq!(buckets.pop_min(), Some(("b", 1)));
        assert_eq!(buckets.pop_min(), Some(("c", 1)));
        assert!(buckets.is_empty());
    }

    #[test]
    fn frequency_buckets_min_freq_tracks_next_bucket() {
        let mut buckets = FrequencyBuckets::new();
        buckets.insert("a");
        buckets.insert("b");
        buckets.insert("c");

        buckets.touch(&"a");
        buckets.touch(&"a");
        assert_eq!(buckets.frequency(&"a"), Some(3));
        assert_eq!(buckets.min_freq(), Some(1));

        buckets.pop_min();
        buckets.pop_min();
        assert_eq!(buckets.min_freq(), Some(3));
        assert_eq!(buckets.peek_min(), Some((&"a", 3)));
    }

    #[test]
    fn frequency_buckets_unchain_middle_of_bucket() {
        let mut buckets = FrequencyBuckets::new();
        buckets.insert("a");
        buckets.insert("b");
        buckets.insert("c");

        // Promoting the middle key must splice its neighbors together.
        assert_eq!(buckets.touch(&"b"), Some(2));
        buckets.debug_validate_invariants();
        assert_eq!(buckets.pop_min(), Some(("a", 1)));
        assert_eq!(buckets.pop_min(), Some(("c", 1)));
        assert_eq!(buckets.pop_min(), Some(("b", 2)));
    }

    #[test]
    fn frequency_buckets_age_down_clamps_to_one() {
        let mut buckets = FrequencyBuckets::new();
        buckets.insert("hot");
        buckets.insert("cold");
        for _ in 0..5 {
            buckets.touch(&"hot");
        }
        assert_eq!(buckets.frequency(&"hot"), Some(6));
        assert_eq!(buckets.frequency(&"cold"), Some(1));

        let total = buckets.age_down(3);
        assert_eq!(buckets.frequency(&"hot"), Some(3));
        assert_eq!(buckets.frequency(&"cold"), Some(1));
        assert_eq!(total, 4);
        assert_eq!(buckets.min_freq(), Some(1));
        buckets.debug_validate_invariants();
    }

    #[test]
    fn frequency_buckets_age_down_preserves_age_order() {
        let mut buckets = FrequencyBuckets::new();
        buckets.insert("old");
        buckets.insert("new");
        buckets.touch(&"old");
        buckets.touch(&"new");

        // Both collapse into frequency 1; "old" arrived first and must be
        // the first victim.
        buckets.age_down(5);
        assert_eq!(buckets.pop_min(), Some(("old", 1)));
        assert_eq!(buckets.pop_min(), Some(("new", 1)));
    }

    #[test]
    fn frequency_buckets_age_down_empty_is_zero() {
        let mut buckets: FrequencyBuckets<&str> = FrequencyBuckets::new();
        assert_eq!(buckets.age_down(1), 0);
        assert_eq!(buckets.min_freq(), None);
    }

    #[test]
    fn frequency_buckets_clear_resets_state() {
        let mut buckets = FrequencyBuckets::new();
        buckets.insert("a");
        buckets.insert("b");
        buckets.touch(&"a");
        buckets.clear();
        assert!(buckets.is_empty());
        assert_eq!(buckets.min_freq(), None);
        assert_eq!(buckets.pop_min(), None);
        assert_eq!(buckets.peek_min(), None);
    }

    #[test]
    fn frequency_buckets_debug_invariants_hold() {
        let mut buckets = FrequencyBuckets::new();
        buckets.insert("a");
        buckets.insert("b");
        buckets.touch(&"a");
        buckets.touch(&"a");
        buckets.pop_min();
        buckets.debug_validate_invariants();
    }
}
