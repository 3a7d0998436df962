//! Monotonic piecewise-linear lookup
//!
//! Knots are sorted by x (ties allowed). A query is located with a binary
//! search and blended linearly between the two bracketing knots. Queries
//! outside the knot range are rejected rather than extrapolated.

use serde::{Deserialize, Serialize};

use crate::config::TiePolicy;
use crate::error::{QuantileError, QuantileResult};

/// Result of a single lookup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lookup {
    pub value: f64,
    /// The query hit a run of tied knots and was resolved by the tie policy
    pub tied: bool,
}

/// Piecewise-linear function through `(xs[i], ys[i])`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiecewiseLinear {
    xs: Vec<f64>,
    ys: Vec<f64>,
    tie_policy: TiePolicy,
}

impl PiecewiseLinear {
    /// Build from knots
    ///
    /// `xs` and `ys` must be finite and non-decreasing with finite gaps
    /// between neighbours, both the same length and at least 2 long.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> QuantileResult<Self> {
        if xs.len() != ys.len() {
            return Err(QuantileError::ShapeMismatch {
                what: "interpolation knots".to_string(),
                expected: xs.len(),
                actual: ys.len(),
            });
        }
        if xs.len() < 2 {
            return Err(QuantileError::InvalidEdges {
                message: format!("need at least 2 knots, got {}", xs.len()),
            });
        }
        if !is_sorted_finite(&xs) || !is_sorted_finite(&ys) {
            return Err(QuantileError::InvalidEdges {
                message: "interpolation knots must be finite, non-decreasing and finitely spaced"
                    .to_string(),
            });
        }

        Ok(Self {
            xs,
            ys,
            tie_policy: TiePolicy::default(),
        })
    }

    pub fn with_tie_policy(mut self, tie_policy: TiePolicy) -> Self {
        self.tie_policy = tie_policy;
        self
    }

    /// Covered x range (inclusive)
    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    pub fn knots(&self) -> (&[f64], &[f64]) {
        (&self.xs, &self.ys)
    }

    /// Evaluate at `x`
    ///
    /// Returns `None` when `x` is NaN or outside the domain. An exact knot
    /// returns that knot's y value unchanged.
    pub fn evaluate(&self, x: f64) -> Option<Lookup> {
        let (min, max) = self.domain();
        if !(x >= min && x <= max) {
            return None;
        }

        let xs = &self.xs;
        let last = xs.len() - 1;

        let (lo, hi) = match self.tie_policy {
            TiePolicy::LowestEdge => {
                // First knot >= x; exists because x <= max
                let idx = xs.partition_point(|&v| v < x);
                if xs[idx] == x {
                    let tied = idx < last && xs[idx + 1] == x;
                    return Some(Lookup {
                        value: self.ys[idx],
                        tied,
                    });
                }
                (idx - 1, idx)
            }
            TiePolicy::HighestEdge => {
                // Last knot <= x; exists because x >= min
                let idx = xs.partition_point(|&v| v <= x) - 1;
                if xs[idx] == x {
                    let tied = idx > 0 && xs[idx - 1] == x;
                    return Some(Lookup {
                        value: self.ys[idx],
                        tied,
                    });
                }
                (idx, idx + 1)
            }
        };

        Some(Lookup {
            value: self.blend(lo, hi, x),
            tied: false,
        })
    }

    /// Linear blend on a segment with `xs[lo] < x < xs[hi]`
    fn blend(&self, lo: usize, hi: usize, x: f64) -> f64 {
        let (x0, x1) = (self.xs[lo], self.xs[hi]);
        let (y0, y1) = (self.ys[lo], self.ys[hi]);
        let t = (x - x0) / (x1 - x0);
        // Rounding may overshoot the segment end
        (y0 + (y1 - y0) * t).clamp(y0, y1)
    }
}

fn is_sorted_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
        && values
            .windows(2)
            .all(|w| w[0] <= w[1] && (w[1] - w[0]).is_finite())
}
