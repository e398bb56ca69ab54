//! # Least Recently Used (LRU) cache
//!
//! Recency list + hash index: the entry that has gone longest without a hit
//! is the eviction victim.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                         LruCache<K, V>                           │
//!   │                                                                  │
//!   │   ┌────────────────────────────────────────────────────────────┐ │
//!   │   │  index: FxHashMap<K, EntryRef>                             │ │
//!   │   │                                                            │ │
//!   │   │  ┌─────────┬──────────┐                                    │ │
//!   │   │  │   Key   │ EntryRef │                                    │ │
//!   │   │  ├─────────┼──────────┤                                    │ │
//!   │   │  │  page_1 │  ──────────────────────────────┐              │ │
//!   │   │  │  page_2 │  ────────────────────────┐     │              │ │
//!   │   │  │  page_3 │  ──────────────────┐     │     │              │ │
//!   │   │  └─────────┴────────────────────┼─────┼─────┼──────────────┘ │
//!   │   │                                 ▼     ▼     ▼                │
//!   │   │  list: RecencyList<Entry>                                    │
//!   │   │                                                              │ │
//!   │   │  mru ──► ┌──────┐ ◄──► ┌──────┐ ◄──► ┌──────┐ ◄── lru        │ │
//!   │   │          │ k, v │      │ k, v │      │ k, v │                │ │
//!   │   │          └──────┘      └──────┘      └──────┘                │ │
//!   │   │      most recent ───────────────────► least recent           │ │
//!   │   └──────────────────────────────────────────────────────────────┘ │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Method      | Complexity | Description                             |
//! |-------------|------------|-----------------------------------------|
//! | `insert`    | O(1) avg   | Insert or overwrite + move to MRU       |
//! | `get`       | O(1) avg   | Lookup + move to MRU                    |
//! | `peek`      | O(1) avg   | Lookup without reordering               |
//! | `remove`    | O(1) avg   | Unlink + erase from the index           |
//! | `pop_lru`   | O(1)       | Remove and return the LRU entry         |
//! | `peek_lru`  | O(1)       | Inspect the LRU entry                   |
//! | `touch`     | O(1) avg   | Move to MRU without retrieving          |
//!
//! ## Eviction
//!
//! ```text
//!   insert(D) with capacity = 3:
//!
//!   before:  mru ──► [A] ◄──► [B] ◄──► [C] ◄── lru
//!   1. pop [C] from the LRU end, erase from the index
//!   2. push [D] at the MRU end
//!   after:   mru ──► [D] ◄──► [A] ◄──► [B] ◄── lru
//! ```
//!
//! Entries live in a slab-backed [`RecencyList`]; the index maps keys to
//! generation-tagged handles. No raw pointers, no shared-ownership cycles.
//!
//! ## Thread Safety
//!
//! `LruCache` is single-threaded (`&mut self`). Use the sharded wrapper for
//! concurrent access.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::recency_list::{EntryRef, RecencyList};
#[cfg(feature = "metrics")]
use crate::metrics::{MetricsSnapshot, PolicyMetrics};
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Least Recently Used cache.
///
/// Evicts the entry adjacent to the LRU end of the recency list when a new
/// entry is admitted at capacity. All operations are O(1) average.
///
/// # Example
///
/// ```
/// use evictkit::policy::lru::LruCache;
/// use evictkit::traits::CoreCache;
///
/// let mut cache = LruCache::new(2);
/// cache.insert("a", 1);
/// cache.insert("b", 2);
///
/// // "a" is refreshed, so "b" is the victim when "c" arrives.
/// cache.get(&"a");
/// cache.insert("c", 3);
///
/// assert_eq!(cache.get(&"a"), Some(&1));
/// assert_eq!(cache.get(&"b"), None);
/// assert_eq!(cache.get(&"c"), Some(&3));
/// ```
pub struct LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    index: FxHashMap<K, EntryRef>,
    list: RecencyList<Entry<K, V>>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: PolicyMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LRU cache with the given capacity.
    ///
    /// A capacity of 0 creates a cache that accepts no entries.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            list: RecencyList::with_capacity(capacity),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: PolicyMetrics::default(),
        }
    }

    /// Read-only lookup that does not refresh the entry.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::policy::lru::LruCache;
    /// use evictkit::traits::CoreCache;
    ///
    /// let mut cache = LruCache::new(2);
    /// cache.insert(1, "first");
    /// cache.insert(2, "second");
    ///
    /// // Peek does not affect eviction order: 1 stays LRU.
    /// assert_eq!(cache.peek(&1), Some(&"first"));
    /// cache.insert(3, "third");
    /// assert!(!cache.contains(&1));
    /// ```
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot(self.index.len(), self.capacity)
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(self.index.len() <= self.capacity);
        assert_eq!(self.index.len(), self.list.len());
        for (key, &id) in &self.index {
            let entry = self.list.get(id).expect("indexed entry missing");
            assert!(&entry.key == key);
        }
        self.list.debug_validate_invariants();
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            self.list.move_to_mru(id);
            return self
                .list
                .get_mut(id)
                .map(|entry| std::mem::replace(&mut entry.value, value));
        }

        if self.capacity == 0 {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_rejected();
            return None;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_admission();

        if self.index.len() >= self.capacity && self.pop_lru().is_some() {
            #[cfg(feature = "metrics")]
            self.metrics.record_eviction();
        }

        let id = self.list.push_mru(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            }
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.list.move_to_mru(id);
        self.list.get(id).map(|entry| &entry.value)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.index.clear();
        self.list.clear();
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        self.list.remove(id).map(|entry| entry.value)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        let entry = self.list.pop_lru()?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.peek_lru().map(|entry| (&entry.key, &entry.value))
    }

    fn touch(&mut self, key: &K) -> bool {
        match self.index.get(key) {
            Some(&id) => self.list.move_to_mru(id),
            None => false,
        }
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}
