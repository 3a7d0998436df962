//! Shared test helpers: sample generation and histogram construction
//!
//! Histogram building lives here, not in the library.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Standard normal samples from a fixed seed
pub fn gaussian_samples(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();
    (0..n).map(|_| normal.sample(&mut rng)).collect()
}

/// Uniform [0, 1) samples from a fixed seed
pub fn uniform_samples(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen::<f64>()).collect()
}

/// `bins + 1` evenly spaced edges spanning the data
pub fn linear_edges(data: &[f64], bins: usize) -> Vec<f64> {
    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / bins as f64;
    let mut edges: Vec<f64> = (0..=bins).map(|i| min + width * i as f64).collect();
    // Keep the extremes exact so every sample is inside the edges
    edges[0] = min;
    edges[bins] = max;
    edges
}

/// Count samples per bin; the last bin is closed on the right, values
/// outside the edges are dropped
pub fn histogram(data: &[f64], edges: &[f64]) -> Vec<f64> {
    let bins = edges.len() - 1;
    let mut counts = vec![0.0; bins];
    for &x in data {
        if x < edges[0] || x > edges[bins] {
            continue;
        }
        let bin = edges.partition_point(|&e| e <= x).saturating_sub(1).min(bins - 1);
        counts[bin] += 1.0;
    }
    counts
}

/// Sum of absolute per-bin differences
pub fn abs_error(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}
