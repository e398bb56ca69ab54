//! # Hash-sharded concurrent wrapper
//!
//! Partitions a key space across N independent policy instances, each behind
//! its own mutex, so operations on unrelated keys proceed in parallel
//! without any cross-shard coordination.
//!
//! ## Architecture
//!
//! ```text
//!   ┌────────────────────────────────────────────────────────────────┐
//!   │                    ShardedCache<K, V, C>                       │
//!   │                                                                │
//!   │   key ──► ShardSelector ──► hash % N                           │
//!   │                                                                │
//!   │   ┌────────────────┐ ┌────────────────┐ ┌────────────────┐     │
//!   │   │ Mutex<C>       │ │ Mutex<C>       │ │ Mutex<C>       │ ... │
//!   │   │ capacity ⌈C/N⌉ │ │ capacity ⌈C/N⌉ │ │ capacity ⌈C/N⌉ │     │
//!   │   └────────────────┘ └────────────────┘ └────────────────┘     │
//!   │        shard 0            shard 1            shard 2           │
//!   └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Shards are fully independent: each carries its own lock and its own
//! policy invariants, and no rebalancing happens between them. A shard that
//! fills up evicts locally even if its neighbors have room — the accepted
//! price for lock-free inter-shard paths.
//!
//! `get` returns a cloned snapshot of the value rather than a reference;
//! references must not outlive the shard lock.

use std::hash::Hash;
use std::marker::PhantomData;

use parking_lot::Mutex;

use crate::ds::shard::ShardSelector;
use crate::policy::arc::ArcCache;
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
use crate::policy::lru_k::LrukCache;
use crate::traits::{ConcurrentCache, CoreCache};

/// Resolves a caller-provided shard count: 0 means "use the hardware
/// parallelism hint".
fn resolve_slices(slice_num: usize) -> usize {
    if slice_num > 0 {
        slice_num
    } else {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

/// Hash-sharded wrapper over any [`CoreCache`] policy.
///
/// Total capacity `C` over `N` shards gives each shard ⌈C/N⌉ entries of the
/// same underlying policy. Every operation on a key is routed to the shard
/// `hash(key) % N`, so per-key serialization is preserved while unrelated
/// keys never contend.
///
/// # Example
///
/// ```
/// use evictkit::sharded::ShardedLruCache;
///
/// let cache: ShardedLruCache<u64, String> = ShardedLruCache::with_slices(64, 4);
/// cache.put(1, "one".to_string());
///
/// assert_eq!(cache.get(&1), Some("one".to_string()));
/// assert_eq!(cache.get(&2), None);
/// assert_eq!(cache.shard_count(), 4);
/// ```
pub struct ShardedCache<K, V, C> {
    shards: Vec<Mutex<C>>,
    selector: ShardSelector,
    capacity: usize,
    _marker: PhantomData<fn(K) -> V>,
}

impl<K, V, C> ShardedCache<K, V, C>
where
    K: Hash + Eq,
    C: CoreCache<K, V>,
{
    /// Creates a sharded cache, building each shard with `build(shard_capacity)`.
    ///
    /// `slice_num == 0` selects the hardware parallelism hint. The per-shard
    /// capacity is `capacity.div_ceil(slices)`.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::policy::lru_k::LrukCache;
    /// use evictkit::sharded::ShardedCache;
    ///
    /// // Any policy can be sharded through the builder closure.
    /// let cache: ShardedCache<u64, u64, _> =
    ///     ShardedCache::new(64, 4, |shard_capacity| {
    ///         LrukCache::with_k(shard_capacity, shard_capacity, 2)
    ///     });
    /// assert_eq!(cache.shard_count(), 4);
    /// ```
    pub fn new(capacity: usize, slice_num: usize, build: impl Fn(usize) -> C) -> Self {
        let slices = resolve_slices(slice_num);
        let shard_capacity = capacity.div_ceil(slices);
        let shards = (0..slices).map(|_| Mutex::new(build(shard_capacity))).collect();
        Self {
            shards,
            selector: ShardSelector::new(slices, 0),
            capacity,
            _marker: PhantomData,
        }
    }

    fn shard(&self, key: &K) -> &Mutex<C> {
        &self.shards[self.selector.shard_for_key(key)]
    }

    /// Inserts or overwrites `key` in its shard.
    pub fn put(&self, key: K, value: V) {
        self.shard(&key).lock().insert(key, value);
    }

    /// Looks up `key`, returning a cloned snapshot of the value.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.shard(key).lock().get(key).cloned()
    }

    /// Looks up `key`, returning `V::default()` on a miss.
    pub fn get_or_default(&self, key: &K) -> V
    where
        V: Clone + Default,
    {
        self.get(key).unwrap_or_default()
    }

    /// Returns `true` if `key` is cached, without updating access state.
    pub fn contains(&self, key: &K) -> bool {
        self.shard(key).lock().contains(key)
    }

    /// Returns the total number of entries across all shards.
    ///
    /// Locks each shard in turn; the result is a momentary snapshot under
    /// concurrent mutation.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    /// Returns `true` if no shard holds any entry.
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.lock().is_empty())
    }

    /// Returns the configured total capacity.
    ///
    /// The effective bound is `shard_count() * ⌈capacity / shard_count()⌉`
    /// because shards round up.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of shards.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Empties every shard.
    pub fn clear(&self) {
        for shard in &self.shards {
            shard.lock().clear();
        }
    }
}

impl<K, V, C> ConcurrentCache for ShardedCache<K, V, C> where C: Send {}

/// LRU policy sharded by key hash.
pub type ShardedLruCache<K, V> = ShardedCache<K, V, LruCache<K, V>>;

impl<K, V> ShardedLruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Creates a sharded LRU cache. `slice_num == 0` uses the hardware
    /// parallelism hint.
    pub fn with_slices(capacity: usize, slice_num: usize) -> Self {
        ShardedCache::new(capacity, slice_num, LruCache::new)
    }
}

/// LFU policy sharded by key hash.
pub type ShardedLfuCache<K, V> = ShardedCache<K, V, LfuCache<K, V>>;

impl<K, V> ShardedLfuCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Creates a sharded LFU cache with the default aging threshold.
    pub fn with_slices(capacity: usize, slice_num: usize) -> Self {
        ShardedCache::new(capacity, slice_num, LfuCache::new)
    }

    /// Creates a sharded LFU cache with an explicit aging threshold,
    /// passed through to every shard.
    pub fn with_max_average(capacity: usize, slice_num: usize, max_average: u64) -> Self {
        ShardedCache::new(capacity, slice_num, |shard_capacity| {
            LfuCache::with_max_average(shard_capacity, max_average)
        })
    }

    /// Empties every shard without destroying the instance.
    pub fn purge(&self) {
        for shard in &self.shards {
            shard.lock().purge();
        }
    }
}

/// Adaptive policy sharded by key hash.
pub type ShardedArcCache<K, V> = ShardedCache<K, V, ArcCache<K, V>>;

impl<K, V> ShardedArcCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Creates a sharded adaptive cache with the default transform
    /// threshold.
    pub fn with_slices(capacity: usize, slice_num: usize) -> Self {
        ShardedCache::new(capacity, slice_num, ArcCache::new)
    }

    /// Creates a sharded adaptive cache with an explicit transform
    /// threshold, passed through to every shard.
    pub fn with_transform_threshold(
        capacity: usize,
        slice_num: usize,
        transform_threshold: u64,
    ) -> Self {
        ShardedCache::new(capacity, slice_num, |shard_capacity| {
            ArcCache::with_transform_threshold(shard_capacity, transform_threshold)
        })
    }
}

/// LRU-K policy sharded by key hash.
pub type ShardedLrukCache<K, V> = ShardedCache<K, V, LrukCache<K, V>>;

impl<K, V> ShardedLrukCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Creates a sharded LRU-K cache; both the main and history capacities
    /// are split across shards.
    pub fn with_k(capacity: usize, history_capacity: usize, slice_num: usize, k: u64) -> Self {
        let slices = resolve_slices(slice_num);
        let history_per_shard = history_capacity.div_ceil(slices);
        ShardedCache::new(capacity, slices, |shard_capacity| {
            LrukCache::with_k(shard_capacity, history_per_shard, k)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sharded_lru_basic_ops() {
        let cache: ShardedLruCache<u64, String> = ShardedLruCache::with_slices(16, 4);
        assert_eq!(cache.shard_count(), 4);
        assert_eq!(cache.capacity(), 16);
        assert!(cache.is_empty());

        cache.put(1, "one".to_string());
        cache.put(2, "two".to_string());
        assert_eq!(cache.get(&1), Some("one".to_string()));
        assert_eq!(cache.get(&3), None);
        assert!(cache.contains(&2));
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn sharded_get_or_default() {
        let cache: ShardedLruCache<u64, u64> = ShardedLruCache::with_slices(8, 2);
        cache.put(1, 42);
        assert_eq!(cache.get_or_default(&1), 42);
        assert_eq!(cache.get_or_default(&9), 0);
    }

    #[test]
    fn sharded_zero_slices_uses_parallelism_hint() {
        let cache: ShardedLruCache<u64, u64> = ShardedLruCache::with_slices(64, 0);
        assert!(cache.shard_count() >= 1);
    }

    #[test]
    fn sharded_capacity_split_rounds_up() {
        // 10 entries over 4 shards → 3 per shard.
        let cache: ShardedLruCache<u64, u64> = ShardedLruCache::with_slices(10, 4);
        for i in 0..100 {
            cache.put(i, i);
        }
        assert!(cache.len() <= 4 * 3);
    }

    #[test]
    fn sharded_shards_are_independent() {
        // One shard saturated with colliding keys must not evict entries
        // owned by other shards.
        let cache: ShardedLruCache<u64, u64> = ShardedLruCache::with_slices(8, 4);
        let selector = ShardSelector::new(4, 0);

        let probe = 12345u64;
        let probe_shard = selector.shard_for_key(&probe);
        cache.put(probe, 1);

        let mut stuffed = 0;
        let mut key = 0u64;
        while stuffed < 50 {
            if selector.shard_for_key(&key) != probe_shard {
                cache.put(key, key);
                stuffed += 1;
            }
            key += 1;
        }

        assert_eq!(cache.get(&probe), Some(1));
    }

    #[test]
    fn sharded_lfu_purge_empties_all_shards() {
        let cache: ShardedLfuCache<u64, u64> = ShardedLfuCache::with_max_average(16, 4, 5);
        for i in 0..10 {
            cache.put(i, i);
        }
        assert!(!cache.is_empty());

        cache.purge();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&1), None);
    }

    #[test]
    fn sharded_arc_round_trip() {
        let cache: ShardedArcCache<u64, String> =
            ShardedArcCache::with_transform_threshold(32, 4, 2);
        cache.put(7, "seven".to_string());
        assert_eq!(cache.get(&7), Some("seven".to_string()));
    }

    #[test]
    fn sharded_lruk_admission_gate_applies_per_shard() {
        let cache: ShardedLrukCache<u64, u64> = ShardedLrukCache::with_k(16, 16, 4, 3);
        cache.put(5, 50);
        assert_eq!(cache.get(&5), None); // second access, below threshold
        assert_eq!(cache.get(&5), Some(50)); // third access admits
    }

    #[test]
    fn sharded_cache_is_concurrent_marker() {
        fn assert_concurrent<C: ConcurrentCache>() {}
        assert_concurrent::<ShardedLruCache<u64, u64>>();
    }
}
