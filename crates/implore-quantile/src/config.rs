//! Configuration for quantile mapping
//!
//! Controls how flat runs in the destination CDF are resolved and when batch
//! transforms switch to the parallel path.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the inverse lookup resolves a query that lands exactly on a run of
/// tied CDF values (zero-count destination bins)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TiePolicy {
    /// Resolve to the first (lowest) edge of the tied run
    #[default]
    LowestEdge,
    /// Resolve to the last (highest) edge of the tied run
    HighestEdge,
}

/// Transform configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Tie resolution for the destination quantile function
    pub tie_policy: TiePolicy,
    /// Minimum batch size for the parallel path (only with the `parallel` feature)
    pub parallel_threshold: usize,
    /// Emit a warning when a batch resolved degenerate ties
    pub warn_on_degenerate: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            tie_policy: TiePolicy::LowestEdge,
            parallel_threshold: 10_000,
            warn_on_degenerate: true,
        }
    }
}

impl TransformConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tie policy
    pub fn with_tie_policy(mut self, tie_policy: TiePolicy) -> Self {
        self.tie_policy = tie_policy;
        self
    }

    /// Set the parallel threshold
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Load configuration from a TOML string
    #[cfg(feature = "toml-config")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Serialize configuration to TOML
    #[cfg(feature = "toml-config")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parallel_threshold == 0 {
            return Err(ConfigError::OutOfRange(
                "parallel_threshold must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Value out of range: {0}")]
    OutOfRange(String),
}
