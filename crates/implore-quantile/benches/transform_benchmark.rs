//! Quantile transform benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use implore_quantile::{transform, QuantileTransformer};

/// Deterministic triangular-ish counts and evenly spaced edges
fn generate_histograms(bins: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let edges: Vec<f64> = (0..=bins).map(|i| i as f64 / bins as f64).collect();
    let source: Vec<f64> = (0..bins)
        .map(|i| 1.0 + (bins / 2).abs_diff(i) as f64)
        .collect();
    let dest: Vec<f64> = (0..bins).map(|i| 1.0 + i as f64).collect();
    (edges, source, dest)
}

fn generate_data(count: usize) -> Vec<f64> {
    (0..count).map(|i| (i as f64 * 0.618_034) % 1.0).collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantile_build");

    for bins in [10, 100, 1000] {
        let (edges, source, dest) = generate_histograms(bins);
        group.bench_with_input(BenchmarkId::from_parameter(bins), &bins, |b, _| {
            b.iter(|| QuantileTransformer::new(black_box(&source), black_box(&dest), &edges))
        });
    }
    group.finish();
}

fn bench_transform_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantile_transform_batch");
    let (edges, source, dest) = generate_histograms(50);
    let transformer = QuantileTransformer::new(&source, &dest, &edges).unwrap();

    for count in [100, 10_000, 1_000_000] {
        let data = generate_data(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &data, |b, data| {
            b.iter(|| transformer.transform(black_box(data)))
        });
    }
    group.finish();
}

fn bench_transform_oneshot(c: &mut Criterion) {
    let (edges, source, dest) = generate_histograms(50);
    let data = generate_data(10_000);

    c.bench_function("quantile_transform_oneshot", |b| {
        b.iter(|| transform(black_box(&data), &source, &dest, &edges))
    });
}

criterion_group!(
    benches,
    bench_build,
    bench_transform_batch,
    bench_transform_oneshot
);
criterion_main!(benches);
