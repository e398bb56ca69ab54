//! # Cache Trait Hierarchy
//!
//! Defines the shared contract every replacement policy in this crate
//! satisfies, plus policy-specific extension traits. Policies are disjoint
//! concrete types — the traits are a capability set, not an inheritance
//! hierarchy.
//!
//! ## Architecture
//!
//! ```text
//!                  ┌─────────────────────────────────────────┐
//!                  │            CoreCache<K, V>              │
//!                  │                                         │
//!                  │  insert(&mut, K, V) → Option<V>         │
//!                  │  get(&mut, &K) → Option<&V>             │
//!                  │  get_or_default(&mut, &K) → V           │
//!                  │  contains(&, &K) → bool                 │
//!                  │  len / is_empty / capacity / clear      │
//!                  └──────────────────┬──────────────────────┘
//!                                     │
//!            ┌────────────────────────┼────────────────────────┐
//!            ▼                        ▼                        ▼
//! ┌──────────────────────┐ ┌──────────────────────┐ ┌──────────────────────┐
//! │  MutableCache<K, V>  │ │  LfuCacheTrait<K, V> │ │ LrukCacheTrait<K, V> │
//! │                      │ │                      │ │                      │
//! │  remove(&K)          │ │  pop_lfu()           │ │  k_value() → u64     │
//! └──────────┬───────────┘ │  peek_lfu()          │ │  access_count(&K)    │
//!            ▼             │  frequency(&K)       │ └──────────────────────┘
//! ┌──────────────────────┐ └──────────────────────┘
//! │  LruCacheTrait<K, V> │
//! │                      │
//! │  pop_lru()           │
//! │  peek_lru()          │
//! │  touch(&K) → bool    │
//! └──────────────────────┘
//! ```
//!
//! ## Trait Summary
//!
//! | Trait             | Extends        | Implemented by                    |
//! |-------------------|----------------|-----------------------------------|
//! | `CoreCache`       | -              | every policy                      |
//! | `MutableCache`    | `CoreCache`    | LRU (arbitrary removal)           |
//! | `LruCacheTrait`   | `MutableCache` | LRU                               |
//! | `LfuCacheTrait`   | `CoreCache`    | LFU                               |
//! | `LrukCacheTrait`  | `CoreCache`    | LRU-K                             |
//! | `ConcurrentCache` | `Send + Sync`  | sharded wrapper                   |
//!
//! Arbitrary removal is deliberately restricted to the recency policy: the
//! admission-gated, frequency-tracking and adaptive policies keep bookkeeping
//! (history counters, frequency totals, ghost lists) whose contract is
//! defined only for hit/miss/evict transitions.
//!
//! ## Failure model
//!
//! Misses are values, not errors: `get` returns `None`, `get_or_default`
//! returns `V::default()`. A cache constructed with capacity 0 accepts the
//! construction, rejects every insert, and misses every get.

/// Core cache operations that all policies support.
///
/// # Type Parameters
///
/// - `K`: key type (implementations require `Eq + Hash`, typically `Clone`)
/// - `V`: value type
///
/// # Example
///
/// ```
/// use evictkit::traits::CoreCache;
/// use evictkit::policy::lru::LruCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = LruCache::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if it existed.
    ///
    /// On overwrite the entry is repositioned according to the policy (moved
    /// to MRU, frequency bumped, ...). If the cache is full, a victim is
    /// evicted before a new entry is admitted. With capacity 0 this is a
    /// silent no-op.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::traits::CoreCache;
    /// use evictkit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(10);
    /// assert_eq!(cache.insert(1, "first"), None);
    /// assert_eq!(cache.insert(1, "second"), Some("first"));
    /// ```
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// A hit updates the policy's internal state (recency, frequency, access
    /// counters); a miss leaves the cache untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::traits::CoreCache;
    /// use evictkit::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(10);
    /// cache.insert(1, "value");
    ///
    /// assert_eq!(cache.get(&1), Some(&"value"));
    /// assert_eq!(cache.get(&99), None);
    /// ```
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Gets a value by key, or `V::default()` on a miss.
    ///
    /// The convenience form of [`get`](Self::get) for callers that treat the
    /// default value as "absent". A hit has the same policy side effects as
    /// `get`; note the default gives no way to distinguish a miss from a
    /// cached default value.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::traits::CoreCache;
    /// use evictkit::policy::lru::LruCache;
    ///
    /// let mut cache: LruCache<u32, u64> = LruCache::new(10);
    /// cache.insert(1, 42);
    ///
    /// assert_eq!(cache.get_or_default(&1), 42);
    /// assert_eq!(cache.get_or_default(&99), 0);
    /// ```
    fn get_or_default(&mut self, key: &K) -> V
    where
        V: Clone + Default,
    {
        self.get(key).cloned().unwrap_or_default()
    }

    /// Checks if a key exists without updating access state.
    ///
    /// Unlike [`get`](Self::get), this does not affect eviction order.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries in the cache.
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum capacity of the cache.
    fn capacity(&self) -> usize;

    /// Removes all entries from the cache.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// # Example
///
/// ```
/// use evictkit::traits::{CoreCache, MutableCache};
/// use evictkit::policy::lru::LruCache;
///
/// fn invalidate<C: MutableCache<u64, String>>(cache: &mut C, keys: &[u64]) {
///     for key in keys {
///         cache.remove(key);
///     }
/// }
///
/// let mut cache = LruCache::new(100);
/// cache.insert(1, "one".to_string());
/// cache.insert(2, "two".to_string());
///
/// invalidate(&mut cache, &[1]);
/// assert!(!cache.contains(&1));
/// assert!(cache.contains(&2));
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a specific key-value pair.
    ///
    /// Returns the removed value if the key existed, or `None` if it didn't.
    fn remove(&mut self, key: &K) -> Option<V>;
}

/// LRU-specific operations that respect access order.
///
/// # Example
///
/// ```
/// use evictkit::traits::{CoreCache, LruCacheTrait};
/// use evictkit::policy::lru::LruCache;
///
/// let mut cache = LruCache::new(3);
/// cache.insert(1, "first");
/// cache.insert(2, "second");
/// cache.insert(3, "third");
///
/// // Access key 1 to make it MRU; key 2 becomes LRU.
/// cache.get(&1);
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));
///
/// // Touch without retrieving the value.
/// assert!(cache.touch(&2));
/// let (key, _) = cache.pop_lru().unwrap();
/// assert_eq!(key, 3);
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Peeks at the LRU entry without removing it or updating access order.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks an entry as recently used without retrieving the value.
    ///
    /// Returns `true` if the key was found and touched.
    fn touch(&mut self, key: &K) -> bool;
}

/// LFU-specific operations that respect frequency order.
///
/// # Example
///
/// ```
/// use evictkit::traits::{CoreCache, LfuCacheTrait};
/// use evictkit::policy::lfu::LfuCache;
///
/// let mut cache = LfuCache::new(10);
/// cache.insert(1, "first");
/// cache.insert(2, "second");
///
/// // Key 2 gains frequency; key 1 stays at 1 and is the LFU victim.
/// cache.get(&2);
/// assert_eq!(cache.frequency(&2), Some(2));
///
/// let (key, _) = cache.pop_lfu().unwrap();
/// assert_eq!(key, 1);
/// ```
pub trait LfuCacheTrait<K, V>: CoreCache<K, V> {
    /// Removes and returns the least frequently used entry.
    ///
    /// Ties within a frequency are broken by arrival order (oldest first).
    fn pop_lfu(&mut self) -> Option<(K, V)>;

    /// Peeks at the LFU entry without removing it or bumping its frequency.
    fn peek_lfu(&self) -> Option<(&K, &V)>;

    /// Returns the access frequency for a key, if present.
    fn frequency(&self, key: &K) -> Option<u64>;
}

/// LRU-K specific operations exposing the admission gate.
///
/// # Example
///
/// ```
/// use evictkit::traits::{CoreCache, LrukCacheTrait};
/// use evictkit::policy::lru_k::LrukCache;
///
/// let mut cache = LrukCache::with_k(10, 10, 3);
/// assert_eq!(cache.k_value(), 3);
///
/// // A rejected put leaves an admission-history trace.
/// cache.insert(1, "pending");
/// assert!(!cache.contains(&1));
/// assert_eq!(cache.access_count(&1), Some(1));
/// ```
pub trait LrukCacheTrait<K, V>: CoreCache<K, V> {
    /// Returns the admission threshold K.
    fn k_value(&self) -> u64;

    /// Returns the admission-history access count for a key not yet in the
    /// main cache, or `None` if the key is untracked.
    fn access_count(&self, key: &K) -> Option<u64>;
}

/// Marker trait for caches that are safe to use concurrently.
///
/// Implementors guarantee every operation takes `&self` and synchronizes
/// internally. Policy cores are `&mut self` and rely on an external lock or
/// the sharded wrapper instead.
pub trait ConcurrentCache: Send + Sync {}
