use evictkit::policy::lru::LruCache;
use evictkit::traits::CoreCache;

fn main() {
    let mut cache: LruCache<&str, String> = LruCache::new(2);

    cache.insert("a", "alpha".to_string());
    cache.insert("b", "beta".to_string());

    cache.get(&"a");
    cache.insert("c", "gamma".to_string());

    println!("contains a? {}", cache.contains(&"a"));
    println!("contains b? {}", cache.contains(&"b"));
}

// Expected output:
// contains a? true
// contains b? false
//
// Explanation: capacity=2; "a" is refreshed before inserting "c", so the
// least recently used entry "b" is evicted.
