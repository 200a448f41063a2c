//! Benchmarks for race classification queries over generated fields
//!
//! Tests aggregation cost for:
//! - General classification (bunching + time summation across stages)
//! - Points and mountain classifications (aggregation + ranking by points)
//! - Field size scaling from a small race to a full grand tour
//!
//! Platform: Cross-platform (generated data, CI-safe)

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use peloton::test_utils::{FieldSpec, build_field};
use std::hint::black_box;

fn bench_general_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("general_classification");

    for riders in [20u32, 80, 176] {
        let field = FieldSpec { riders, ..FieldSpec::default() };
        let (mut portal, race) = build_field(field).expect("Failed to build field");

        group.throughput(Throughput::Elements(u64::from(riders)));
        group.bench_function(BenchmarkId::new("times", riders), |b| {
            b.iter(|| black_box(portal.general_classification_times_in_race(race).unwrap()))
        });
        group.bench_function(BenchmarkId::new("rank", riders), |b| {
            b.iter(|| black_box(portal.riders_general_classification_rank(race).unwrap()))
        });
    }

    group.finish();
}

fn bench_points_classifications(c: &mut Criterion) {
    let (mut portal, race) = build_field(FieldSpec::default()).expect("Failed to build field");

    let mut group = c.benchmark_group("points_classifications");

    group.bench_function("points_totals", |b| {
        b.iter(|| black_box(portal.riders_points_in_race(race).unwrap()))
    });

    group.bench_function("points_rank", |b| {
        b.iter(|| black_box(portal.riders_point_classification_rank(race).unwrap()))
    });

    group.bench_function("mountain_rank", |b| {
        b.iter(|| black_box(portal.riders_mountain_point_classification_rank(race).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_general_classification, bench_points_classifications);
criterion_main!(benches);
