//! Benchmark for matrix preparation: square padding, reduction and reporting
//!
//! Run with: cargo bench --bench reduction_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rand::SeedableRng;

use hungaro::pipeline::{normalize, reduce, Assignment, CostMatrix};
use hungaro::report::{chart_series, describe};

/// Generate a random cost matrix with a fixed seed
fn generate_cost_matrix(rows: usize, cols: usize, seed: u64) -> CostMatrix {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let cells = (0..rows)
        .map(|_| (0..cols).map(|_| rng.gen::<f64>() * 1000.0).collect())
        .collect();
    CostMatrix::new(cells)
}

/// Benchmark normalize + reduce on square matrices of growing size
fn benchmark_square_reduction(c: &mut Criterion) {
    let mut group = c.benchmark_group("square_reduction");

    for size in [10, 50, 100, 250] {
        let matrix = generate_cost_matrix(size, size, 42);
        group.throughput(Throughput::Elements((size * size) as u64));

        group.bench_with_input(
            BenchmarkId::new("normalize_reduce", format!("{}x{}", size, size)),
            &matrix,
            |b, matrix| {
                b.iter(|| reduce(&normalize(black_box(matrix))));
            },
        );
    }

    group.finish();
}

/// Benchmark padding cost for wide and tall matrices
fn benchmark_rectangular_padding(c: &mut Criterion) {
    let mut group = c.benchmark_group("rectangular_padding");

    for (rows, cols) in [(10, 200), (200, 10), (100, 150)] {
        let matrix = generate_cost_matrix(rows, cols, 7);

        group.bench_with_input(
            BenchmarkId::new("normalize", format!("{}x{}", rows, cols)),
            &matrix,
            |b, matrix| {
                b.iter(|| normalize(black_box(matrix)));
            },
        );
    }

    group.finish();
}

/// Benchmark report and chart generation for a shuffled assignment
fn benchmark_describe(c: &mut Criterion) {
    let mut group = c.benchmark_group("describe");

    for size in [10, 100, 500] {
        let matrix = generate_cost_matrix(size, size, 11);
        let mut columns: Vec<usize> = (0..size).collect();
        columns.shuffle(&mut rand::rngs::StdRng::seed_from_u64(3));
        let assignment = Assignment::from_columns(&columns);
        let labels: Vec<String> = (0..size).map(|i| format!("Employee {}", i)).collect();

        group.bench_with_input(BenchmarkId::new("report", size), &size, |b, _| {
            b.iter(|| {
                let report = describe(black_box(&assignment), black_box(&matrix), &labels, &labels);
                let chart = chart_series(black_box(&assignment), black_box(&matrix), &labels);
                (report, chart)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_square_reduction,
    benchmark_rectangular_padding,
    benchmark_describe,
);
criterion_main!(benches);
