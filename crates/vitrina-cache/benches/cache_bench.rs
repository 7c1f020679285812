use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use vitrina_cache::{CacheConfig, ManualClock, TtlCache};
use vitrina_core::{AdminQuery, CacheKey};

/// Pagina simulada de un listado admin con N filas
fn create_page(rows: usize) -> Vec<String> {
    (0..rows).map(|i| format!("row-{}", i)).collect()
}

fn populated_cache(entries: usize) -> TtlCache<Vec<String>> {
    let cache: TtlCache<Vec<String>> = TtlCache::new(CacheConfig::default());
    let page = Arc::new(create_page(50));
    for i in 0..entries {
        let resource = format!("Resource{}", i % 20);
        let key = AdminQuery::new(resource, (i / 20) as u32 + 1, 50).cache_key();
        cache.set(key, Arc::clone(&page));
    }
    cache
}

/// Benchmark: get (hit)
fn bench_get_hit(c: &mut Criterion) {
    let cache = populated_cache(1_000);
    let key = AdminQuery::new("Resource3", 1, 50).cache_key();

    c.bench_function("cache_get_hit", |b| {
        b.iter(|| std::hint::black_box(cache.get(&key)));
    });
}

/// Benchmark: get (miss)
fn bench_get_miss(c: &mut Criterion) {
    let cache = populated_cache(1_000);
    let key = AdminQuery::new("Nonexistent", 1, 50).cache_key();

    c.bench_function("cache_get_miss", |b| {
        b.iter(|| std::hint::black_box(cache.get(&key)));
    });
}

/// Benchmark: set con keys nuevas
fn bench_set(c: &mut Criterion) {
    let cache: TtlCache<Vec<String>> = TtlCache::new(CacheConfig::default());
    let page = Arc::new(create_page(50));
    let counter = AtomicU64::new(0);

    c.bench_function("cache_set", |b| {
        b.iter(|| {
            let count = counter.fetch_add(1, Ordering::Relaxed);
            cache.set(format!("admin:Item:{}", count), Arc::clone(&page));
        });
    });
}

/// Benchmark: invalidacion por patron con distintos tamanos de cache
fn bench_delete_pattern(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_delete_pattern");

    for size in [100, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter_batched(
                || populated_cache(size),
                |cache| std::hint::black_box(cache.delete_pattern("^admin:Resource7:").unwrap()),
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

/// Benchmark: sweep cuando solo una fraccion de entries esta expirada
fn bench_purge_expired(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_purge_expired");

    for size in [1_000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter_batched(
                || {
                    let clock = ManualClock::new(0);
                    let cache: TtlCache<u64> =
                        TtlCache::with_clock(CacheConfig::default(), Arc::new(clock.clone()));
                    for i in 0..size {
                        // 10% expira antes del sweep
                        let ttl = if i % 10 == 0 { 1 } else { 60_000 };
                        cache.set_with_ttl(format!("k{}", i), i as u64, Duration::from_millis(ttl));
                    }
                    clock.advance(Duration::from_millis(10));
                    cache
                },
                |cache| std::hint::black_box(cache.purge_expired()),
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_get_hit,
    bench_get_miss,
    bench_set,
    bench_delete_pattern,
    bench_purge_expired,
);

criterion_main!(benches);
