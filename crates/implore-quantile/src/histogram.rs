//! Validated histogram inputs
//!
//! A histogram is a sequence of N non-negative counts plus a shared edge
//! sequence of N + 1 strictly increasing values. Count `i` covers the
//! half-open interval `[edges[i], edges[i + 1])`.

use serde::{Deserialize, Serialize};

use crate::error::{HistogramRole, QuantileError, QuantileResult};

/// Strictly increasing, finite bin edges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinEdges {
    edges: Vec<f64>,
}

impl BinEdges {
    /// Validate and wrap an edge sequence
    pub fn new(edges: Vec<f64>) -> QuantileResult<Self> {
        if edges.len() < 2 {
            return Err(QuantileError::InvalidEdges {
                message: format!("need at least 2 edges, got {}", edges.len()),
            });
        }

        if let Some(i) = edges.iter().position(|e| !e.is_finite()) {
            return Err(QuantileError::InvalidEdges {
                message: format!("edge {} is not finite ({})", i, edges[i]),
            });
        }

        if let Some(i) = edges.windows(2).position(|w| w[1] <= w[0]) {
            return Err(QuantileError::InvalidEdges {
                message: format!(
                    "edges must be strictly increasing, but edge {} ({}) >= edge {} ({})",
                    i,
                    edges[i],
                    i + 1,
                    edges[i + 1]
                ),
            });
        }

        if let Some(i) = edges.windows(2).position(|w| !(w[1] - w[0]).is_finite()) {
            return Err(QuantileError::InvalidEdges {
                message: format!(
                    "width of bin {} ({} to {}) is not finite",
                    i,
                    edges[i],
                    edges[i + 1]
                ),
            });
        }

        Ok(Self { edges })
    }

    /// Validate a borrowed edge slice
    pub fn from_slice(edges: &[f64]) -> QuantileResult<Self> {
        Self::new(edges.to_vec())
    }

    /// Number of bins covered (one less than the number of edges)
    pub fn bin_count(&self) -> usize {
        self.edges.len() - 1
    }

    /// Number of edges
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Always false; a valid edge sequence has at least two entries
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Lowest edge
    pub fn min(&self) -> f64 {
        self.edges[0]
    }

    /// Highest edge
    pub fn max(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    /// Check whether `x` lies inside `[min, max]` (NaN never does)
    pub fn contains(&self, x: f64) -> bool {
        x >= self.min() && x <= self.max()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.edges
    }
}

/// Bin counts of one histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    counts: Vec<f64>,
    total: f64,
}

impl Histogram {
    /// Validate counts against the shared edges
    ///
    /// Fails on a length mismatch with `edges`, on any negative or
    /// non-finite count, on a zero total and on a total that overflows.
    pub fn new(counts: Vec<f64>, edges: &BinEdges, role: HistogramRole) -> QuantileResult<Self> {
        if counts.len() != edges.bin_count() {
            return Err(QuantileError::ShapeMismatch {
                what: format!("{} counts (edges has {} entries)", role, edges.len()),
                expected: edges.bin_count(),
                actual: counts.len(),
            });
        }

        if let Some(bin) = counts.iter().position(|c| !c.is_finite() || *c < 0.0) {
            return Err(QuantileError::InvalidCount {
                role,
                bin,
                value: counts[bin],
            });
        }

        let total: f64 = counts.iter().sum();
        if total <= 0.0 {
            return Err(QuantileError::EmptyHistogram { role });
        }
        if !total.is_finite() {
            return Err(QuantileError::TotalOverflow { role });
        }

        Ok(Self { counts, total })
    }

    /// Validate a borrowed count slice
    pub fn from_slice(
        counts: &[f64],
        edges: &BinEdges,
        role: HistogramRole,
    ) -> QuantileResult<Self> {
        Self::new(counts.to_vec(), edges, role)
    }

    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    /// Sum of all counts (always positive)
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Check that two count arrays can share one edge sequence
pub fn check_matching_lengths(source: &[f64], dest: &[f64]) -> QuantileResult<()> {
    if source.len() != dest.len() {
        return Err(QuantileError::ShapeMismatch {
            what: "destination counts (must match source counts)".to_string(),
            expected: source.len(),
            actual: dest.len(),
        });
    }
    Ok(())
}
