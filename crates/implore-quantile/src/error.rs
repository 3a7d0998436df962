//! Error types for implore-quantile
//!
//! Every hard failure aborts the whole call. A transform either returns one
//! output per input value or nothing at all.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;

/// Maximum number of offending values spelled out in an `OutOfRange` message
const MAX_LISTED_VALUES: usize = 5;

/// Which of the two histograms an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistogramRole {
    Source,
    Destination,
}

impl fmt::Display for HistogramRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistogramRole::Source => write!(f, "source"),
            HistogramRole::Destination => write!(f, "destination"),
        }
    }
}

/// A data value rejected by the forward CDF lookup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RejectedValue {
    /// Position in the input sequence
    pub index: usize,
    /// The value itself (may be NaN)
    pub value: f64,
}

/// Main error type for quantile mapping
#[derive(Error, Debug)]
pub enum QuantileError {
    /// Edge and count lengths disagree
    #[error("Shape mismatch for {what}: expected length {expected}, got {actual}")]
    ShapeMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },

    /// Edge sequence is unusable
    #[error("Invalid bin edges: {message}")]
    InvalidEdges { message: String },

    /// Negative or non-finite bin count
    #[error("Invalid count in {role} histogram at bin {bin}: {value}")]
    InvalidCount {
        role: HistogramRole,
        bin: usize,
        value: f64,
    },

    /// Total count is zero so the CDF is undefined
    #[error("The {role} histogram has a total count of zero")]
    EmptyHistogram { role: HistogramRole },

    /// Counts are individually finite but their sum is not
    #[error("The {role} histogram's total count overflows")]
    TotalOverflow { role: HistogramRole },

    /// Values outside the range covered by the edges
    #[error(
        "{} value(s) outside [{}, {}]: {}",
        .values.len(),
        .min,
        .max,
        format_rejected(.values)
    )]
    OutOfRange {
        values: Vec<RejectedValue>,
        min: f64,
        max: f64,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

fn format_rejected(values: &[RejectedValue]) -> String {
    let mut listed: Vec<String> = values
        .iter()
        .take(MAX_LISTED_VALUES)
        .map(|v| format!("[{}]={}", v.index, v.value))
        .collect();
    if values.len() > MAX_LISTED_VALUES {
        listed.push(format!("and {} more", values.len() - MAX_LISTED_VALUES));
    }
    listed.join(", ")
}

/// Result type alias for quantile operations
pub type QuantileResult<T> = Result<T, QuantileError>;
