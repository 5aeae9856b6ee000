//! Benchmarks for the LCS engine in lcs/
//!
//! Performance-critical paths:
//! - `lcs`: alignment of line sequences with scattered edits
//! - `lcs` on repetitive input, where match lists are long
//! - `diff` / `sdiff`: record construction on top of the alignment

#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

/// Builds a source-like file of `n` lines and a copy with every
/// `stride`-th line rewritten.
fn edited_lines(n: usize, stride: usize) -> (Vec<String>, Vec<String>) {
    let old: Vec<String> = (0..n).map(|i| format!("    let value_{i} = compute({i});")).collect();
    let new = old
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i % stride == 0 {
                format!("    // rewritten {i}")
            } else {
                line.clone()
            }
        })
        .collect();
    (old, new)
}

fn bench_lcs_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("lcs/lines");

    let sizes = [100usize, 1_000, 10_000];

    for size in sizes {
        let (old, new) = edited_lines(size, 7);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| seqdiff::lcs(black_box(&old), black_box(&new)));
        });
    }

    group.finish();
}

fn bench_lcs_repetitive(c: &mut Criterion) {
    let mut group = c.benchmark_group("lcs/repetitive");

    // Few distinct symbols: every element has many candidate matches
    let sizes = [("256", 256usize), ("1k", 1024), ("4k", 4096)];

    for (name, size) in sizes {
        let old: Vec<u8> = (0..size).map(|i| b"abcd"[i % 4]).collect();
        let new: Vec<u8> = (0..size).map(|i| b"abcd"[(i * 7 + 3) % 4]).collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(name, |b| {
            b.iter(|| seqdiff::lcs(black_box(&old), black_box(&new)));
        });
    }

    group.finish();
}

fn bench_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("lcs/records");
    let (old, new) = edited_lines(1_000, 5);

    group.bench_function("diff", |b| {
        b.iter(|| seqdiff::diff(black_box(&old), black_box(&new)));
    });
    group.bench_function("sdiff", |b| {
        b.iter(|| seqdiff::sdiff(black_box(&old), black_box(&new)));
    });

    group.finish();
}

criterion_group!(benches, bench_lcs_lines, bench_lcs_repetitive, bench_records);
criterion_main!(benches);
