//! Benchmarks for grouped-cache provider operations

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use grouped_cache::{GcPolicy, GroupCacheProvider, MemoryStore, ProviderConfig};
use std::hint::black_box;
use tokio::runtime::Runtime;

fn create_cache(policy: GcPolicy) -> GroupCacheProvider<MemoryStore> {
    let config = ProviderConfig::with_schema("bench").gc_policy(policy);
    GroupCacheProvider::new(MemoryStore::new(), config)
}

fn bench_set(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut group = c.benchmark_group("set");
    group.throughput(Throughput::Elements(1));

    let cache = create_cache(GcPolicy::Never);
    group.bench_function("ungrouped", |b| {
        b.iter(|| {
            rt.block_on(async {
                cache
                    .set(&[], "", black_box("key"), black_box(&42i32), 3600)
                    .await;
            });
        });
    });

    group.bench_function("one_group", |b| {
        b.iter(|| {
            rt.block_on(async {
                cache
                    .set(&["users"], "users", black_box("key"), black_box(&42i32), 3600)
                    .await;
            });
        });
    });

    group.bench_function("three_groups", |b| {
        b.iter(|| {
            rt.block_on(async {
                cache
                    .set(
                        &["users", "admins", "staff"],
                        "users",
                        black_box("key"),
                        black_box(&42i32),
                        3600,
                    )
                    .await;
            });
        });
    });

    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let cache = create_cache(GcPolicy::Never);

    // Pre-populate
    rt.block_on(async {
        cache.set(&["users"], "users", "key", &42i32, 3600).await;
    });

    let mut group = c.benchmark_group("get");
    group.throughput(Throughput::Elements(1));

    group.bench_function("hit", |b| {
        b.iter(|| {
            rt.block_on(async {
                let _: i32 = cache.get("users", black_box("key"), 0).await;
            });
        });
    });

    group.bench_function("miss", |b| {
        b.iter(|| {
            rt.block_on(async {
                let _: i32 = cache.get("users", black_box("missing"), 0).await;
            });
        });
    });

    group.finish();
}

fn bench_sweep(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut group = c.benchmark_group("set_with_sweep");

    for members in [10usize, 100, 1000] {
        let cache = create_cache(GcPolicy::Always);
        rt.block_on(async {
            for i in 0..members {
                cache
                    .set(&["users"], "users", &i.to_string(), &i, 3600)
                    .await;
            }
        });

        group.throughput(Throughput::Elements(members as u64));
        group.bench_with_input(BenchmarkId::from_parameter(members), &members, |b, _| {
            b.iter(|| {
                rt.block_on(async {
                    cache
                        .set(&["users"], "users", black_box("0"), &0usize, 3600)
                        .await;
                });
            });
        });
    }

    group.finish();
}

fn bench_invalidate_group(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let cache = create_cache(GcPolicy::Never);

    let mut group = c.benchmark_group("invalidate_group");

    for members in [10usize, 100] {
        group.throughput(Throughput::Elements(members as u64));
        group.bench_with_input(BenchmarkId::from_parameter(members), &members, |b, &n| {
            b.iter(|| {
                rt.block_on(async {
                    for i in 0..n {
                        cache
                            .set(&["users"], "users", &i.to_string(), &i, 3600)
                            .await;
                    }
                    black_box(cache.invalidate_group(&["users"]).await);
                });
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_set,
    bench_get,
    bench_sweep,
    bench_invalidate_group
);
criterion_main!(benches);
