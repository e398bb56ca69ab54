use evictkit::policy::arc::ArcCache;
use evictkit::traits::CoreCache;

fn main() {
    let mut cache: ArcCache<u32, String> = ArcCache::new(4);

    for key in 0..6 {
        cache.insert(key, format!("value_{key}"));
    }

    // Keys 0 and 1 fell off the recency half into its ghost list; putting
    // one of them back is a ghost hit that grows the recency half.
    println!("split before: {}/{}", cache.recent_capacity(), cache.frequent_capacity());
    cache.insert(0, "value_0".to_string());
    println!("split after:  {}/{}", cache.recent_capacity(), cache.frequent_capacity());
}

// Expected output:
// split before: 2/2
// split after:  3/1
