pub use crate::builder::{Cache, CacheBuilder, EvictionPolicy};
pub use crate::ds::{EntryRef, FrequencyBuckets, GhostList, RecencyList, ShardSelector};
pub use crate::policy::{ArcCache, LfuCache, LruCache, LrukCache};
pub use crate::traits::{
    ConcurrentCache, CoreCache, LfuCacheTrait, LruCacheTrait, LrukCacheTrait, MutableCache,
};

#[cfg(feature = "concurrency")]
pub use crate::sharded::{
    ShardedArcCache, ShardedCache, ShardedLfuCache, ShardedLruCache, ShardedLrukCache,
};

#[cfg(feature = "metrics")]
pub use crate::metrics::MetricsSnapshot;
