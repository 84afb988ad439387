use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use memocache::MemoCache;
use memosource::HashedSource;

fn bench_cached_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_get");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_hit", |b| {
        let mut cache = MemoCache::new(HashedSource::new(), 1000).unwrap();
        let keys: Vec<String> = (0..100).map(|i| format!("key-{}", i)).collect();

        // Warm the cache
        for key in &keys {
            cache.get(key.clone());
        }

        let mut counter = 0;
        b.iter(|| {
            black_box(cache.get(keys[counter % 100].clone()));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_mixed_50_50(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("50_hit_50_miss", |b| {
        let mut cache = MemoCache::new(HashedSource::new(), 100).unwrap();
        let hot: Vec<String> = (0..50).map(|i| format!("hot-{}", i)).collect();

        for key in &hot {
            cache.get(key.clone());
        }

        let mut counter = 0u64;
        b.iter(|| {
            let key = if counter % 2 == 0 {
                hot[(counter as usize / 2) % 50].clone()
            } else {
                format!("cold-{}", counter)
            };
            black_box(cache.get(key));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_cache_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_miss");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_miss_evict", |b| {
        let mut cache = MemoCache::new(HashedSource::new(), 10).unwrap(); // Small cache
        let keys: Vec<String> = (0..100).map(|i| format!("key-{}", i)).collect();

        let mut counter = 0;
        b.iter(|| {
            // Cycling through more keys than capacity guarantees misses
            black_box(cache.get(keys[counter % 100].clone()));
            counter += 1;
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_cached_get,
    bench_mixed_50_50,
    bench_cache_miss
);
criterion_main!(benches);
