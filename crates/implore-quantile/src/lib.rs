//! implore-quantile - Histogram quantile mapping for scientific visualization
//!
//! Maps samples from one empirical distribution onto the matching quantile
//! of another, using only the two histograms (bin counts over shared bin
//! edges):
//!
//! - **CdfCurve**: piecewise-linear CDF through the bin edges
//! - **PiecewiseLinear**: bounded monotonic lookup with explicit tie handling
//! - **QuantileTransformer**: source CDF forward, destination CDF inverse
//!
//! # Example
//!
//! ```
//! use implore_quantile::transform;
//!
//! let edges = [0.0, 1.0, 2.0, 3.0];
//! let source = [10.0, 20.0, 10.0];
//! let dest = [5.0, 5.0, 30.0];
//!
//! let out = transform(&[1.0], &source, &dest, &edges).unwrap();
//! assert_eq!(out, vec![2.0]);
//! ```
//!
//! Histogram construction is left to the caller. Values outside the edge
//! range are rejected, never clamped or extrapolated.

pub mod cdf;
pub mod config;
pub mod error;
pub mod histogram;
pub mod interp;
pub mod transform;

pub use cdf::*;
pub use config::*;
pub use error::*;
pub use histogram::*;
pub use interp::*;
pub use transform::*;
