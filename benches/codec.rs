//! Benchmarks for lz77pack compression and decompression.
//!
//! Compares the brute-force and prefix-indexed match finders across window
//! sizes and data patterns, and measures decode throughput.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lz77pack::{compress_with, decompress, CompressConfig, MatchStrategy};
use std::hint::black_box;

/// Generate random (incompressible) data
fn generate_random_data(size: usize) -> Vec<u8> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut data = Vec::with_capacity(size);
    let mut hasher = DefaultHasher::new();

    for i in 0..size {
        i.hash(&mut hasher);
        data.push((hasher.finish() & 0xFF) as u8);
    }
    data
}

/// Generate repetitive (highly compressible) data
fn generate_repetitive_data(size: usize) -> Vec<u8> {
    let pattern = b"ABCDABCDABCDABCD";
    pattern.iter().cycle().take(size).copied().collect()
}

/// Generate prose-like data with a small recurring vocabulary
fn generate_text_data(size: usize) -> Vec<u8> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let words: [&[u8]; 10] = [
        b"and ", b"the ", b"prince ", b"said ", b"war ", b"peace ", b"of ", b"to ", b"her ",
        b"was ",
    ];
    let mut data = Vec::with_capacity(size + 8);
    let mut hasher = DefaultHasher::new();
    let mut i = 0usize;

    while data.len() < size {
        i.hash(&mut hasher);
        data.extend_from_slice(words[(hasher.finish() % words.len() as u64) as usize]);
        i += 1;
    }
    data.truncate(size);
    data
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress_strategy");
    let data = generate_text_data(64 * 1024);

    for window in [20usize, 400, 4095] {
        group.throughput(Throughput::Bytes(data.len() as u64));
        for strategy in [MatchStrategy::BruteForce, MatchStrategy::Indexed] {
            let config = CompressConfig::new(window, 15).with_strategy(strategy);
            group.bench_with_input(
                BenchmarkId::new(strategy.to_string(), window),
                &data,
                |b, data| b.iter(|| compress_with(black_box(data), &config).unwrap()),
            );
        }
    }

    group.finish();
}

fn bench_data_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress_pattern");
    let size = 256 * 1024;
    let config = CompressConfig::new(400, 15);

    let patterns = [
        ("random", generate_random_data(size)),
        ("repetitive", generate_repetitive_data(size)),
        ("text", generate_text_data(size)),
    ];

    for (name, data) in patterns.iter() {
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("indexed", name), data, |b, data| {
            b.iter(|| compress_with(black_box(data), &config).unwrap())
        });
    }

    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");

    for size in [64 * 1024, 1024 * 1024] {
        let data = generate_text_data(size);
        let compressed = compress_with(&data, &CompressConfig::new(4095, 15)).unwrap();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("text", size), &compressed, |b, compressed| {
            b.iter(|| decompress(black_box(compressed)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_strategies, bench_data_patterns, bench_decompress);
criterion_main!(benches);
