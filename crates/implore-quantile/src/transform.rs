//! Histogram quantile transform
//!
//! Maps each value through the source CDF and back out through the
//! destination quantile function, so a sample's rank in the source
//! distribution becomes the same rank in the destination distribution.
//!
//! # Parallel Processing
//!
//! When the `parallel` feature is enabled, batches of at least
//! `TransformConfig::parallel_threshold` values are mapped with rayon.
//! Output order always matches input order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cdf::CdfCurve;
use crate::config::TransformConfig;
use crate::error::{HistogramRole, QuantileError, QuantileResult, RejectedValue};
use crate::histogram::{check_matching_lengths, BinEdges, Histogram};
use crate::interp::{Lookup, PiecewiseLinear};

/// Output of a batch transform together with tie diagnostics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformReport {
    /// Transformed values, same order as the input
    pub values: Vec<f64>,
    /// Number of values whose quantile landed on a flat run of the
    /// destination CDF and was resolved by the tie policy
    pub degenerate_hits: usize,
}

impl TransformReport {
    pub fn has_degenerate_hits(&self) -> bool {
        self.degenerate_hits > 0
    }
}

/// Reusable mapping between two histograms on shared edges
///
/// Both interpolants are built up front; every transform afterwards is a
/// pair of binary searches per value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantileTransformer {
    edges: BinEdges,
    source_cdf: CdfCurve,
    dest_cdf: CdfCurve,
    /// edges -> source CDF
    forward: PiecewiseLinear,
    /// destination CDF -> edges
    inverse: PiecewiseLinear,
    config: TransformConfig,
}

impl QuantileTransformer {
    /// Build with the default configuration
    pub fn new(source: &[f64], dest: &[f64], edges: &[f64]) -> QuantileResult<Self> {
        Self::with_config(source, dest, edges, TransformConfig::default())
    }

    /// Build from raw count and edge slices
    ///
    /// Shape is checked first, then edges, then counts. A histogram with a
    /// zero total fails here, before any data is seen.
    pub fn with_config(
        source: &[f64],
        dest: &[f64],
        edges: &[f64],
        config: TransformConfig,
    ) -> QuantileResult<Self> {
        if edges.len() != source.len() + 1 {
            return Err(QuantileError::ShapeMismatch {
                what: "edges (source counts + 1)".to_string(),
                expected: source.len() + 1,
                actual: edges.len(),
            });
        }
        check_matching_lengths(source, dest)?;

        let edges = BinEdges::from_slice(edges)?;
        let source = Histogram::from_slice(source, &edges, HistogramRole::Source)?;
        let dest = Histogram::from_slice(dest, &edges, HistogramRole::Destination)?;

        Self::from_histograms(&source, &dest, &edges, config)
    }

    /// Build from already validated histograms
    pub fn from_histograms(
        source: &Histogram,
        dest: &Histogram,
        edges: &BinEdges,
        config: TransformConfig,
    ) -> QuantileResult<Self> {
        config.validate()?;
        check_matching_lengths(source.counts(), dest.counts())?;
        if source.len() != edges.bin_count() {
            return Err(QuantileError::ShapeMismatch {
                what: "source counts".to_string(),
                expected: edges.bin_count(),
                actual: source.len(),
            });
        }

        let source_cdf = CdfCurve::from_histogram(source);
        let dest_cdf = CdfCurve::from_histogram(dest);

        let forward =
            PiecewiseLinear::new(edges.as_slice().to_vec(), source_cdf.values().to_vec())?;
        let inverse =
            PiecewiseLinear::new(dest_cdf.values().to_vec(), edges.as_slice().to_vec())?
                .with_tie_policy(config.tie_policy);

        tracing::debug!(
            "Built quantile transformer: {} bins over [{}, {}], {} flat run(s) in destination CDF",
            edges.bin_count(),
            edges.min(),
            edges.max(),
            dest_cdf.flat_runs().len()
        );

        Ok(Self {
            edges: edges.clone(),
            source_cdf,
            dest_cdf,
            forward,
            inverse,
            config,
        })
    }

    /// Transform a batch of values
    pub fn transform(&self, data: &[f64]) -> QuantileResult<Vec<f64>> {
        Ok(self.transform_with_report(data)?.values)
    }

    /// Transform a batch of values and count degenerate tie resolutions
    ///
    /// Every value is range-checked before any lookup, so an error never
    /// comes with partial output.
    pub fn transform_with_report(&self, data: &[f64]) -> QuantileResult<TransformReport> {
        self.check_domain(data)?;

        let lookups = self.map_all(data);
        let degenerate_hits = lookups.iter().filter(|l| l.tied).count();
        if degenerate_hits > 0 && self.config.warn_on_degenerate {
            tracing::warn!(
                "{} of {} value(s) hit a flat run of the destination CDF, resolved with {:?}",
                degenerate_hits,
                data.len(),
                self.config.tie_policy
            );
        }

        Ok(TransformReport {
            values: lookups.into_iter().map(|l| l.value).collect(),
            degenerate_hits,
        })
    }

    /// Transform a single value
    pub fn transform_value(&self, x: f64) -> QuantileResult<f64> {
        self.check_domain(std::slice::from_ref(&x))?;
        Ok(self.map_one(x).value)
    }

    /// Quantile of `x` within the source distribution
    pub fn quantile_of(&self, x: f64) -> QuantileResult<f64> {
        self.forward
            .evaluate(x)
            .map(|l| l.value)
            .ok_or_else(|| self.out_of_range(vec![RejectedValue { index: 0, value: x }]))
    }

    /// Value at quantile `q` of the destination distribution
    pub fn value_at_quantile(&self, q: f64) -> QuantileResult<f64> {
        self.inverse
            .evaluate(q)
            .map(|l| l.value)
            .ok_or_else(|| QuantileError::OutOfRange {
                values: vec![RejectedValue { index: 0, value: q }],
                min: 0.0,
                max: 1.0,
            })
    }

    pub fn edges(&self) -> &BinEdges {
        &self.edges
    }

    pub fn source_cdf(&self) -> &CdfCurve {
        &self.source_cdf
    }

    pub fn dest_cdf(&self) -> &CdfCurve {
        &self.dest_cdf
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    fn check_domain(&self, data: &[f64]) -> QuantileResult<()> {
        let rejected: Vec<RejectedValue> = data
            .iter()
            .enumerate()
            .filter(|(_, x)| !self.edges.contains(**x))
            .map(|(index, &value)| RejectedValue { index, value })
            .collect();

        if rejected.is_empty() {
            return Ok(());
        }

        tracing::debug!(
            "Rejecting batch of {}: {} value(s) outside the bin edges",
            data.len(),
            rejected.len()
        );
        Err(self.out_of_range(rejected))
    }

    fn out_of_range(&self, values: Vec<RejectedValue>) -> QuantileError {
        QuantileError::OutOfRange {
            values,
            min: self.edges.min(),
            max: self.edges.max(),
        }
    }

    /// Forward then inverse lookup for a value already known to be in range
    fn map_one(&self, x: f64) -> Lookup {
        // Forward values lie in [0, 1] and the inverse domain is exactly
        // [0, 1], so neither lookup can miss.
        let q = self.forward.evaluate(x).map_or(0.0, |l| l.value);
        self.inverse.evaluate(q).unwrap_or(Lookup {
            value: self.edges.min(),
            tied: false,
        })
    }

    #[cfg(feature = "parallel")]
    fn map_all(&self, data: &[f64]) -> Vec<Lookup> {
        if data.len() >= self.config.parallel_threshold {
            data.par_iter().map(|&x| self.map_one(x)).collect()
        } else {
            data.iter().map(|&x| self.map_one(x)).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn map_all(&self, data: &[f64]) -> Vec<Lookup> {
        data.iter().map(|&x| self.map_one(x)).collect()
    }
}

/// Map `data` from the source histogram onto the destination histogram
///
/// `source` and `dest` are bin counts over the shared `edges`
/// (`edges.len() == source.len() + 1`).
pub fn transform(
    data: &[f64],
    source: &[f64],
    dest: &[f64],
    edges: &[f64],
) -> QuantileResult<Vec<f64>> {
    QuantileTransformer::new(source, dest, edges)?.transform(data)
}
