// Error taxonomy for the clustering pipeline.
//
// Library code returns these typed errors; the binary wraps them in anyhow
// so they print with context at the top level.

use thiserror::Error;

/// Errors produced while turning input lines into clusters.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// Nothing to cluster: no lines, or no line long enough to yield an n-gram.
    #[error(
        "empty input: no {ngram_size}-grams found in {lines} line(s), nothing to cluster"
    )]
    EmptyInput {
        /// Number of input lines that were read.
        lines: usize,
        /// Configured n-gram length.
        ngram_size: usize,
    },

    /// A configuration value is out of range.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        name: &'static str,
        message: String,
    },

    /// Two pipeline stages disagree about matrix or label shape.
    #[error("dimension mismatch in {stage}: expected {expected}, found {found}")]
    DimensionMismatch {
        stage: &'static str,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, ClusterError>;
