// Clustering pipeline: n-grams -> counts -> standardize -> PCA -> DBSCAN.
//
// The numeric stages are generic parameters bound by `traits`, so this module only
// does orchestration and shape checks.

pub mod dbscan;
pub mod pca;
pub mod scaler;
pub mod traits;

use nalgebra::DMatrix;
use tracing::{debug, info};

use crate::config::ClusterConfig;
use crate::error::{ClusterError, Result};
use crate::features::matrix::build_features;
use crate::features::ngrams::Vocabulary;
use crate::grouping::ClusterGroups;

use self::dbscan::{Dbscan, NOISE};
use self::pca::Pca;
use self::scaler::{zero_variance_columns, StandardScaler};
use self::traits::{Clusterer, Reducer, Scaler};

/// Everything a run produced, for callers that want more than the report.
#[derive(Debug, Clone)]
pub struct ClusterResult {
    /// One label per input line, in input order
    pub labels: Vec<i32>,
    /// Input lines grouped by label
    pub groups: ClusterGroups,
    /// Number of distinct n-grams (feature columns)
    pub vocabulary_size: usize,
    /// Principal components actually used after capping
    pub components: usize,
    /// Feature columns with zero variance that were neutralized
    pub degenerate_columns: usize,
}

impl ClusterResult {
    pub fn cluster_count(&self) -> usize {
        self.groups.cluster_count()
    }

    pub fn noise_count(&self) -> usize {
        self.labels.iter().filter(|&&l| l == NOISE).count()
    }
}

/// The full pipeline with pluggable numeric stages.
pub struct ClusterPipeline<S = StandardScaler, R = Pca, C = Dbscan> {
    ngram_size: usize,
    scaler: S,
    reducer: R,
    clusterer: C,
}

impl ClusterPipeline {
    /// Default stages configured from `config`.
    pub fn from_config(config: &ClusterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            ngram_size: config.ngram_size,
            scaler: StandardScaler::new(),
            reducer: Pca::new(config.n_components),
            clusterer: Dbscan::new(config.epsilon, config.min_samples),
        })
    }
}

impl<S: Scaler, R: Reducer, C: Clusterer> ClusterPipeline<S, R, C> {
    /// Assemble a pipeline from custom stages.
    pub fn with_stages(ngram_size: usize, scaler: S, reducer: R, clusterer: C) -> Self {
        Self {
            ngram_size,
            scaler,
            reducer,
            clusterer,
        }
    }

    /// Build the feature matrix for `corpus`, rejecting inputs with no n-grams.
    pub fn features(&self, corpus: &[String]) -> Result<(Vocabulary, DMatrix<f64>)> {
        let vocab = Vocabulary::build(corpus, self.ngram_size);
        if corpus.is_empty() || vocab.is_empty() {
            return Err(ClusterError::EmptyInput {
                lines: corpus.len(),
                ngram_size: self.ngram_size,
            });
        }
        let features = build_features(corpus, &vocab);
        Ok((vocab, features))
    }

    /// Run every stage and group the input lines by cluster.
    pub fn run(&self, corpus: &[String]) -> Result<ClusterResult> {
        let (vocab, features) = self.features(corpus)?;
        info!(
            lines = corpus.len(),
            ngrams = vocab.len(),
            ngram_size = self.ngram_size,
            "Built n-gram features"
        );

        let degenerate_columns = zero_variance_columns(&features);
        if degenerate_columns > 0 {
            debug!(
                columns = degenerate_columns,
                total = vocab.len(),
                "Neutralized zero-variance feature columns"
            );
        }
        let scaled = self.scaler.fit_transform(&features)?;
        expect_rows("standardize", corpus.len(), scaled.nrows())?;

        let reduced = self.reducer.fit_transform(&scaled)?;
        expect_rows("reduce", corpus.len(), reduced.nrows())?;
        info!(components = reduced.ncols(), "Reduced feature dimensions");

        let labels = self.clusterer.cluster(&reduced)?;
        expect_rows("cluster", corpus.len(), labels.len())?;

        let groups = ClusterGroups::from_labels(corpus, &labels)?;
        info!(
            clusters = groups.cluster_count(),
            noise = groups.noise().map_or(0, <[String]>::len),
            "Clustering complete"
        );

        Ok(ClusterResult {
            labels,
            groups,
            vocabulary_size: vocab.len(),
            components: reduced.ncols(),
            degenerate_columns,
        })
    }
}

/// Cluster `corpus` with the default stages.
pub fn cluster_lines(corpus: &[String], config: &ClusterConfig) -> Result<ClusterResult> {
    ClusterPipeline::from_config(config)?.run(corpus)
}

fn expect_rows(stage: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(ClusterError::DimensionMismatch {
            stage,
            expected,
            found,
        })
    }
}
