//! Cross-policy comparison under a zipf-skewed workload.
//!
//! A zipf key distribution approximates real cache traffic: a small hot set
//! absorbs most accesses while a long tail churns through. Each policy runs
//! the same pre-generated trace.

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Zipf};

use evictkit::policy::arc::ArcCache;
use evictkit::policy::lfu::LfuCache;
use evictkit::policy::lru::LruCache;
use evictkit::policy::lru_k::LrukCache;
use evictkit::traits::CoreCache;

const CAPACITY: usize = 512;
const KEY_SPACE: f64 = 8_192.0;
const TRACE_LEN: usize = 16_384;

fn zipf_trace(seed: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let zipf = Zipf::new(KEY_SPACE, 1.1).expect("valid zipf parameters");
    (0..TRACE_LEN).map(|_| zipf.sample(&mut rng) as u64).collect()
}

fn run_trace<C: CoreCache<u64, u64>>(cache: &mut C, trace: &[u64]) -> u64 {
    let mut hits = 0u64;
    for &key in trace {
        if cache.get(&key).is_some() {
            hits += 1;
        } else {
            cache.insert(key, key);
        }
    }
    hits
}

fn bench_zipf_comparison(c: &mut Criterion) {
    let trace = zipf_trace(0x5EED);
    let mut group = c.benchmark_group("zipf_trace");

    group.bench_function("lru", |b| {
        b.iter_batched(
            || LruCache::new(CAPACITY),
            |mut cache| std::hint::black_box(run_trace(&mut cache, &trace)),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("lru_k", |b| {
        b.iter_batched(
            || LrukCache::with_k(CAPACITY, CAPACITY, 2),
            |mut cache| std::hint::black_box(run_trace(&mut cache, &trace)),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("lfu", |b| {
        b.iter_batched(
            || LfuCache::new(CAPACITY),
            |mut cache| std::hint::black_box(run_trace(&mut cache, &trace)),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("arc", |b| {
        b.iter_batched(
            || ArcCache::new(CAPACITY),
            |mut cache| std::hint::black_box(run_trace(&mut cache, &trace)),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_zipf_comparison);
criterion_main!(benches);
