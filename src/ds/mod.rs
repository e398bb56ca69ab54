pub mod frequency_buckets;
pub mod ghost_list;
pub mod recency_list;
pub mod shard;

pub use frequency_buckets::FrequencyBuckets;
pub use ghost_list::GhostList;
pub use recency_list::{EntryRef, RecencyList};
pub use shard::ShardSelector;
