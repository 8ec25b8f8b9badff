use std::env;

use crate::error::{ClusterError, Result};

/// Default n-gram length.
pub const DEFAULT_NGRAM_SIZE: usize = 2;
/// Default cap on the number of principal components.
pub const DEFAULT_COMPONENTS: usize = 50;
/// Default DBSCAN neighborhood radius.
pub const DEFAULT_EPSILON: f64 = 5.4;
/// Default DBSCAN density threshold (neighbors, self included).
pub const DEFAULT_MIN_SAMPLES: usize = 3;

/// Tuning knobs for one clustering run.
///
/// Passed explicitly into the pipeline; nothing here is global state.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterConfig {
    /// Length of the character n-grams used as features
    pub ngram_size: usize,
    /// Upper bound on principal components kept after standardization
    pub n_components: usize,
    /// DBSCAN radius (Euclidean, inclusive)
    pub epsilon: f64,
    /// Points within `epsilon` (self included) needed to form a core point
    pub min_samples: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            ngram_size: DEFAULT_NGRAM_SIZE,
            n_components: DEFAULT_COMPONENTS,
            epsilon: DEFAULT_EPSILON,
            min_samples: DEFAULT_MIN_SAMPLES,
        }
    }
}

impl ClusterConfig {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional. A `.env` file, if present, should already
    /// have been loaded via dotenvy before this is called.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    ///
    /// `load` passes the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            ngram_size: parse_var(&lookup, "TEXTCLUSTER_NGRAM_SIZE", defaults.ngram_size)?,
            n_components: parse_var(&lookup, "TEXTCLUSTER_COMPONENTS", defaults.n_components)?,
            epsilon: parse_var(&lookup, "TEXTCLUSTER_EPSILON", defaults.epsilon)?,
            min_samples: parse_var(&lookup, "TEXTCLUSTER_MIN_SAMPLES", defaults.min_samples)?,
        })
    }

    /// Check that every value is usable before the pipeline runs.
    pub fn validate(&self) -> Result<()> {
        if self.ngram_size == 0 {
            return Err(ClusterError::InvalidParameter {
                name: "ngram_size",
                message: "must be at least 1".to_string(),
            });
        }
        if self.n_components == 0 {
            return Err(ClusterError::InvalidParameter {
                name: "n_components",
                message: "must be at least 1".to_string(),
            });
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(ClusterError::InvalidParameter {
                name: "epsilon",
                message: format!("must be a positive finite number, got {}", self.epsilon),
            });
        }
        if self.min_samples == 0 {
            return Err(ClusterError::InvalidParameter {
                name: "min_samples",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse()
                .map_err(|_| ClusterError::InvalidParameter {
                    name: key,
                    message: format!("could not parse {raw:?}"),
                })
        }
        _ => Ok(default),
    }
}
