//! Benchmarks for catalog encoding and decoding
//!
//! Every catalog write decodes and re-encodes the whole member map, so these
//! costs scale with group size.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use grouped_cache_core::{Catalog, JsonSerializer, Serializer};
use std::hint::black_box;

#[cfg(feature = "msgpack")]
use grouped_cache_core::MsgPackSerializer;

#[cfg(feature = "bincode")]
use grouped_cache_core::BincodeSerializer;

fn catalog_of(members: usize) -> Catalog {
    (0..members)
        .map(|i| format!("app:users:user-{:08}", i))
        .collect()
}

fn test_cases() -> Vec<(&'static str, Catalog)> {
    vec![
        ("10_members", catalog_of(10)),
        ("1k_members", catalog_of(1_000)),
        ("100k_members", catalog_of(100_000)),
    ]
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_encode");

    for (name, catalog) in &test_cases() {
        group.throughput(Throughput::Elements(catalog.len() as u64));

        group.bench_with_input(BenchmarkId::new("json", name), catalog, |b, catalog| {
            b.iter(|| black_box(catalog.encode(&JsonSerializer).unwrap()));
        });

        #[cfg(feature = "msgpack")]
        group.bench_with_input(BenchmarkId::new("msgpack", name), catalog, |b, catalog| {
            b.iter(|| black_box(catalog.encode(&MsgPackSerializer).unwrap()));
        });

        #[cfg(feature = "bincode")]
        group.bench_with_input(BenchmarkId::new("bincode", name), catalog, |b, catalog| {
            b.iter(|| black_box(catalog.encode(&BincodeSerializer).unwrap()));
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_decode");

    for (name, catalog) in &test_cases() {
        let json_bytes = JsonSerializer.serialize(catalog).unwrap();
        group.throughput(Throughput::Bytes(json_bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("json", name), &json_bytes, |b, bytes| {
            b.iter(|| black_box(Catalog::decode(&JsonSerializer, Some(black_box(bytes.as_slice())))));
        });

        #[cfg(feature = "msgpack")]
        {
            let bytes = MsgPackSerializer.serialize(catalog).unwrap();
            group.throughput(Throughput::Bytes(bytes.len() as u64));
            group.bench_with_input(BenchmarkId::new("msgpack", name), &bytes, |b, bytes| {
                b.iter(|| black_box(Catalog::decode(&MsgPackSerializer, Some(black_box(bytes.as_slice())))));
            });
        }

        #[cfg(feature = "bincode")]
        {
            let bytes = BincodeSerializer.serialize(catalog).unwrap();
            group.throughput(Throughput::Bytes(bytes.len() as u64));
            group.bench_with_input(BenchmarkId::new("bincode", name), &bytes, |b, bytes| {
                b.iter(|| black_box(Catalog::decode(&BincodeSerializer, Some(black_box(bytes.as_slice())))));
            });
        }
    }

    group.finish();
}

fn bench_malformed(c: &mut Criterion) {
    let garbage = vec![0xffu8; 4096];
    c.bench_function("catalog_decode_malformed", |b| {
        b.iter(|| black_box(Catalog::decode(&JsonSerializer, Some(black_box(garbage.as_slice())))));
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_malformed);
criterion_main!(benches);
