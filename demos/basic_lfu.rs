use evictkit::policy::lfu::LfuCache;
use evictkit::traits::{CoreCache, LfuCacheTrait};

fn main() {
    let mut cache: LfuCache<&str, String> = LfuCache::new(2);

    cache.insert("a", "alpha".to_string());
    cache.insert("b", "beta".to_string());

    cache.get(&"a");
    cache.insert("c", "gamma".to_string());

    println!("contains a? {}", cache.contains(&"a"));
    println!("contains b? {}", cache.contains(&"b"));
    println!("freq a = {:?}", cache.frequency(&"a"));
}

// Expected output:
// contains a? true
// contains b? false
// freq a = Some(2)
//
// Explanation: capacity=2; "a" is accessed before inserting "c", so the
// least frequent entry "b" (freq 1) is evicted.
