//! Bounded recency list for ghost entries.
//!
//! Used by the adaptive policy to track recently evicted keys without
//! keeping their values. A hit on a ghost ("this key was hot until
//! recently") is the signal that drives capacity adaptation.
//!
//! Ghosts are woven into a chain addressed by key: the same hash map that
//! answers the membership probe stores each ghost's two neighbors, so there
//! is no separate list structure and no handle indirection.
//!
//! ```text
//!   links: FxHashMap<K, GhostLinks<K>>
//!   ┌─────────┬───────────────────────────────────┐
//!   │  "c"    │ { newer: None,      older: "b" }  │ ◄─ newest
//!   │  "b"    │ { newer: Some(c),   older: "a" }  │
//!   │  "a"    │ { newer: Some(b),   older: None } │ ◄─ oldest
//!   └─────────┴───────────────────────────────────┘
//!
//!   record(D) when full: unlink the oldest ghost, chain D at the newest end
//!   remove(B) on ghost hit: splice B's neighbors together
//! ```
//!
//! Ghosts hold keys only; the evicted value's memory is released before the
//! key is recorded. A zero-capacity ghost list ignores all records.

use rustc_hash::FxHashMap;
use std::hash::Hash;

#[derive(Debug)]
struct GhostLinks<K> {
    newer: Option<K>,
    older: Option<K>,
}

/// Bounded list of recently evicted keys, newest first.
///
/// # Example
///
/// ```
/// use evictkit::ds::GhostList;
///
/// let mut ghost = GhostList::new(2);
/// ghost.record("a");
/// ghost.record("b");
///
/// // At capacity, the oldest ghost is dropped.
/// ghost.record("c");
/// assert!(!ghost.contains(&"a"));
/// assert!(ghost.contains(&"b"));
/// assert!(ghost.contains(&"c"));
///
/// // A ghost hit removes the entry.
/// assert!(ghost.remove(&"b"));
/// assert!(!ghost.contains(&"b"));
/// ```
#[derive(Debug)]
pub struct GhostList<K> {
    links: FxHashMap<K, GhostLinks<K>>,
    newest: Option<K>,
    oldest: Option<K>,
    capacity: usize,
}

impl<K> GhostList<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates a ghost list holding at most `capacity` keys.
    ///
    /// A capacity of 0 creates a no-op ghost list.
    pub fn new(capacity: usize) -> Self {
        Self {
            links: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            newest: None,
            oldest: None,
            capacity,
        }
    }

    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of keys currently tracked.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns `true` if no keys are tracked.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Returns `true` if `key` is present — the ghost-hit check.
    pub fn contains(&self, key: &K) -> bool {
        self.links.contains_key(key)
    }

    /// Records `key` as the newest ghost, dropping the oldest if at capacity.
    ///
    /// Re-recording a present key moves it to the newest position.
    pub fn record(&mut self, key: K) {
        if self.capacity == 0 {
            return;
        }

        if self.links.contains_key(&key) {
            self.splice_out(&key);
            self.chain_newest(key);
            return;
        }

        if self.links.len() >= self.capacity {
            if let Some(stale) = self.oldest.clone() {
                self.splice_out(&stale);
                self.links.remove(&stale);
            }
        }
        self.chain_newest(key);
    }

    /// Removes `key`; returns `true` if it was present.
    ///
    /// Called after a ghost hit so the signal fires at most once per key.
    pub fn remove(&mut self, key: &K) -> bool {
        if !self.links.contains_key(key) {
            return false;
        }
        self.splice_out(key);
        self.links.remove(key);
        true
    }

    /// Clears all tracked keys.
    pub fn clear(&mut self) {
        self.links.clear();
        self.newest = None;
        self.oldest = None;
    }

    /// Unlinks `key` from the chain; its map entry survives for reuse.
    fn splice_out(&mut self, key: &K) {
        let (newer, older) = match self.links.get(key) {
            Some(links) => (links.newer.clone(), links.older.clone()),
            None => return,
        };

        match &newer {
            Some(newer_key) => {
                if let Some(links) = self.links.get_mut(newer_key) {
                    links.older = older.clone();
                }
            }
            None => self.newest = older.clone(),
        }
        match &older {
            Some(older_key) => {
                if let Some(links) = self.links.get_mut(older_key) {
                    links.newer = newer.clone();
                }
            }
            None => self.oldest = newer,
        }
    }

    /// Chains `key` at the newest end, inserting or overwriting its links.
    fn chain_newest(&mut self, key: K) {
        let displaced = self.newest.replace(key.clone());
        match &displaced {
            Some(previous) => {
                if let Some(links) = self.links.get_mut(previous) {
                    links.newer = Some(key.clone());
                }
            }
            None => self.oldest = Some(key.clone()),
        }
        self.links.insert(
            key,
            GhostLinks {
                newer: None,
                older: displaced,
            },
        );
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(self.links.len() <= self.capacity);
        if self.links.is_empty() {
            assert!(self.newest.is_none());
            assert!(self.oldest.is_none());
            return;
        }

        let mut count = 0usize;
        let mut newer: Option<K> = None;
        let mut cursor = self.newest.clone();
        while let Some(key) = cursor {
            let links = self.links.get(&key).expect("chained ghost missing from map");
            assert!(links.newer == newer);
            if links.older.is_none() {
                assert!(self.oldest.as_ref() == Some(&key));
            }
            count += 1;
            assert!(count <= self.links.len(), "cycle in ghost chain");
            newer = Some(key);
            cursor = links.older.clone();
        }
        assert_eq!(count, self.links.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ghost_list_records_and_hits() {
        let mut ghost = GhostList::new(10);
        ghost.record("evicted");
        assert_eq!(ghost.len(), 1);
        assert!(ghost.contains(&"evicted"));
        assert!(!ghost.contains(&"never_seen"));

        assert!(ghost.remove(&"evicted"));
        assert!(!ghost.remove(&"evicted"));
        assert!(ghost.is_empty());
    }

    #[test]
    fn ghost_list_bounds_drop_oldest() {
        let mut ghost = GhostList::new(2);
        ghost.record("a");
        ghost.record("b");
        ghost.record("c");
        assert_eq!(ghost.len(), 2);
        assert!(!ghost.contains(&"a"));
        assert!(ghost.contains(&"b"));
        assert!(ghost.contains(&"c"));
    }

    #[test]
    fn ghost_list_rerecord_promotes() {
        let mut ghost = GhostList::new(2);
        ghost.record("a");
        ghost.record("b");
        // "a" becomes newest, so "b" is the next victim.
        ghost.record("a");
        ghost.record("c");
        assert!(ghost.contains(&"a"));
        assert!(!ghost.contains(&"b"));
        assert!(ghost.contains(&"c"));
    }

    #[test]
    fn ghost_list_remove_relinks_neighbors() {
        let mut ghost = GhostList::new(3);
        ghost.record("a");
        ghost.record("b");
        ghost.record("c");

        // Removing the middle ghost must keep the age order intact.
        assert!(ghost.remove(&"b"));
        ghost.debug_validate_invariants();
        ghost.record("d");
        ghost.record("e"); // over capacity: "a" (oldest) is dropped
        assert!(!ghost.contains(&"a"));
        assert!(ghost.contains(&"c"));
        assert!(ghost.contains(&"d"));
        assert!(ghost.contains(&"e"));
        ghost.debug_validate_invariants();
    }

    #[test]
    fn ghost_list_zero_capacity_is_noop() {
        let mut ghost = GhostList::new(0);
        ghost.record("a");
        assert!(ghost.is_empty());
        assert!(!ghost.contains(&"a"));
    }

    #[test]
    fn ghost_list_rerecord_does_not_grow() {
        let mut ghost = GhostList::new(10);
        ghost.record("a");
        ghost.record("a");
        assert_eq!(ghost.len(), 1);
        ghost.debug_validate_invariants();
    }

    #[test]
    fn ghost_list_clear_resets_state() {
        let mut ghost = GhostList::new(4);
        ghost.record("a");
        ghost.record("b");
        ghost.clear();
        assert!(ghost.is_empty());
        assert!(!ghost.contains(&"a"));
        ghost.debug_validate_invariants();
    }
}
