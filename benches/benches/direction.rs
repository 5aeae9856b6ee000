//! Benchmarks for patchset normalization and direction detection
//!
//! Performance-critical paths:
//! - `normalize_value`: flattening a JSON patchset of raw tuples
//! - `detect_direction`: tallying evidence with and without a limit

#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use seqdiff::{Change, DirectionDetector};

fn fixture(n: usize) -> (Vec<String>, Vec<Change<String>>) {
    let old: Vec<String> = (0..n).map(|i| format!("line {i}")).collect();
    let new: Vec<String> = old
        .iter()
        .enumerate()
        .map(|(i, line)| if i % 3 == 0 { format!("edited {i}") } else { line.clone() })
        .collect();
    let records = seqdiff::diff(&old, &new).into_iter().flatten().collect();
    (old, records)
}

fn bench_normalize_raw(c: &mut Criterion) {
    let (_, records) = fixture(2_000);
    let document: serde_json::Value = records
        .iter()
        .map(|change| change.to_raw().unwrap())
        .collect();

    c.bench_function("direction/normalize_value", |b| {
        b.iter(|| seqdiff::normalize_value::<String>(black_box(&document)));
    });
}

fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("direction/detect");
    let (old, records) = fixture(10_000);

    for limit in [None, Some(100), Some(1_000)] {
        let detector = limit.map_or_else(DirectionDetector::new, |l| {
            DirectionDetector::new().with_limit(l)
        });
        let label = limit.map_or_else(|| "unlimited".to_string(), |l| l.to_string());

        group.bench_with_input(BenchmarkId::from_parameter(label), &detector, |b, detector| {
            b.iter(|| detector.detect(black_box(&old), black_box(&records)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize_raw, bench_detect);
criterion_main!(benches);
