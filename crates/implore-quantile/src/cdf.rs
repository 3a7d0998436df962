//! Piecewise-linear CDF built from histogram counts
//!
//! The curve has one point per bin edge. It starts at 0 on the first edge
//! and at edge `i` holds the fraction of the total count in bins `[0, i)`.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::histogram::{BinEdges, Histogram};

/// Normalized cumulative curve aligned one-to-one with the bin edges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdfCurve {
    values: Vec<f64>,
}

impl CdfCurve {
    /// Build the curve from validated counts
    pub fn from_histogram(histogram: &Histogram) -> Self {
        let total = histogram.total();
        let mut values = Vec::with_capacity(histogram.len() + 1);
        values.push(0.0);

        let mut running = 0.0;
        for &count in histogram.counts() {
            running += count;
            values.push(running / total);
        }

        // The inverse lookup must cover q = 1 exactly
        if let Some(last) = values.last_mut() {
            *last = 1.0;
        }

        Self { values }
    }

    /// CDF values, one per edge
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of curve points (bins + 1)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// (edge, cdf) pairs for plotting
    pub fn points(&self, edges: &BinEdges) -> Vec<(f64, f64)> {
        edges
            .as_slice()
            .iter()
            .copied()
            .zip(self.values.iter().copied())
            .collect()
    }

    /// Index ranges of tied consecutive values (runs of zero-count bins)
    ///
    /// Each range covers every curve point in the run, so it always has at
    /// least two entries.
    pub fn flat_runs(&self) -> Vec<Range<usize>> {
        let mut runs = Vec::new();
        let mut start = 0;

        for i in 1..=self.values.len() {
            if i == self.values.len() || self.values[i] != self.values[start] {
                if i - start > 1 {
                    runs.push(start..i);
                }
                start = i;
            }
        }

        runs
    }

    /// Check whether the curve rises on every segment
    pub fn is_strictly_increasing(&self) -> bool {
        self.values.windows(2).all(|w| w[1] > w[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HistogramRole;

    fn curve(counts: &[f64], edges: &BinEdges) -> CdfCurve {
        let hist = Histogram::from_slice(counts, edges, HistogramRole::Source).unwrap();
        CdfCurve::from_histogram(&hist)
    }

    #[test]
    fn test_cdf_values() {
        let edges = BinEdges::new(vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        let cdf = curve(&[10.0, 20.0, 10.0], &edges);
        assert_eq!(cdf.values(), &[0.0, 0.25, 0.75, 1.0]);
        assert!(cdf.is_strictly_increasing());
    }

    #[test]
    fn test_cdf_ends_at_one() {
        let edges = BinEdges::new(vec![0.0, 1.0, 2.0, 3.0, 4.0]).unwrap();
        let cdf = curve(&[0.1, 0.2, 0.3, 0.7], &edges);
        assert_eq!(cdf.values()[0], 0.0);
        assert_eq!(*cdf.values().last().unwrap(), 1.0);
        assert_eq!(cdf.len(), 5);
    }

    #[test]
    fn test_cdf_points() {
        let edges = BinEdges::new(vec![-1.0, 0.0, 1.0]).unwrap();
        let cdf = curve(&[1.0, 3.0], &edges);
        assert_eq!(cdf.points(&edges), vec![(-1.0, 0.0), (0.0, 0.25), (1.0, 1.0)]);
    }

    #[test]
    fn test_flat_runs() {
        let edges = BinEdges::new(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        // Leading zero bin, zero run in the middle, trailing zero bin
        let cdf = curve(&[0.0, 2.0, 0.0, 0.0, 2.0, 0.0], &edges);
        assert_eq!(cdf.values(), &[0.0, 0.0, 0.5, 0.5, 0.5, 1.0, 1.0]);
        assert_eq!(cdf.flat_runs(), vec![0..2, 2..5, 5..7]);
        assert!(!cdf.is_strictly_increasing());
    }

    #[test]
    fn test_no_flat_runs() {
        let edges = BinEdges::new(vec![0.0, 1.0, 2.0]).unwrap();
        let cdf = curve(&[1.0, 1.0], &edges);
        assert!(cdf.flat_runs().is_empty());
    }
}
