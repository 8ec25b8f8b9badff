// Stage traits: the swap-ready seams of the pipeline.
//
// Each numeric stage exposes one narrow operation so a different backend
// (another scaler, a randomized PCA, an indexed DBSCAN) can be dropped in
// without touching the orchestration in `pipeline::ClusterPipeline`.

use nalgebra::DMatrix;

use crate::error::Result;

/// Per-column rescaling of a feature matrix.
pub trait Scaler {
    /// Fit on `x` and return the rescaled matrix (same shape).
    fn fit_transform(&self, x: &DMatrix<f64>) -> Result<DMatrix<f64>>;
}

/// Projection of rows into a lower-dimensional space.
pub trait Reducer {
    /// Fit on `x` and return one projected row per input row.
    fn fit_transform(&self, x: &DMatrix<f64>) -> Result<DMatrix<f64>>;
}

/// Assignment of a cluster label to every row.
pub trait Clusterer {
    /// One label per row: non-negative ids for clusters, `NOISE` (-1) otherwise.
    fn cluster(&self, x: &DMatrix<f64>) -> Result<Vec<i32>>;
}
