// Principal component analysis by exact symmetric eigendecomposition.
//
// The centered data X (n rows, p columns) is decomposed through whichever of
// the two Gram forms is smaller:
//
//   n <= p:  X Xᵀ = U Λ Uᵀ  ->  scores = U √Λ
//   n >  p:  Xᵀ X = V Λ Vᵀ  ->  scores = X V
//
// Both give the same projections up to sign. The sign of every component is
// then fixed so that its largest-magnitude score is positive, which makes the
// output reproducible across runs and across the two code paths.

use nalgebra::{DMatrix, SymmetricEigen};
use tracing::debug;

use super::traits::Reducer;
use crate::error::{ClusterError, Result};

/// PCA projection onto at most `n_components` components.
#[derive(Debug, Clone)]
pub struct Pca {
    n_components: usize,
}

impl Pca {
    pub fn new(n_components: usize) -> Self {
        Self { n_components }
    }

    /// Components actually produced for an `n_samples` x `n_features` input.
    ///
    /// The configured count is capped at the data size instead of failing.
    pub fn effective_components(&self, n_samples: usize, n_features: usize) -> usize {
        self.n_components.min(n_features).min(n_samples)
    }
}

impl Reducer for Pca {
    fn fit_transform(&self, x: &DMatrix<f64>) -> Result<DMatrix<f64>> {
        let (n_samples, n_features) = x.shape();
        if self.n_components == 0 {
            return Err(ClusterError::InvalidParameter {
                name: "n_components",
                message: "must be at least 1".to_string(),
            });
        }

        let k = self.effective_components(n_samples, n_features);
        if k < self.n_components {
            debug!(
                requested = self.n_components,
                used = k,
                n_samples,
                n_features,
                "Capped PCA components to data size"
            );
        }
        if k == 0 {
            return Ok(DMatrix::zeros(n_samples, 0));
        }

        let centered = center_columns(x);
        let mut scores = if n_samples <= n_features {
            scores_from_gram(&centered, k)
        } else {
            scores_from_covariance(&centered, k)
        };
        fix_signs(&mut scores);

        Ok(scores)
    }
}

fn center_columns(x: &DMatrix<f64>) -> DMatrix<f64> {
    let mut centered = x.clone();
    for mut column in centered.column_iter_mut() {
        let mean = column.iter().sum::<f64>() / column.len() as f64;
        column.iter_mut().for_each(|v| *v -= mean);
    }
    centered
}

/// Eigen-decompose a symmetric matrix; return eigenpair indices by
/// descending eigenvalue.
fn sorted_eigen(m: DMatrix<f64>) -> (SymmetricEigen<f64, nalgebra::Dyn>, Vec<usize>) {
    let eigen = SymmetricEigen::new(m);
    let mut order: Vec<usize> = (0..eigen.eigenvalues.len()).collect();
    order.sort_by(|&a, &b| {
        eigen.eigenvalues[b]
            .partial_cmp(&eigen.eigenvalues[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });
    (eigen, order)
}

fn scores_from_gram(centered: &DMatrix<f64>, k: usize) -> DMatrix<f64> {
    let n = centered.nrows();
    let gram = centered * centered.transpose();
    let (eigen, order) = sorted_eigen(gram);

    let mut scores = DMatrix::zeros(n, k);
    for (c, &idx) in order.iter().take(k).enumerate() {
        // Tiny negative eigenvalues are rounding noise on a PSD matrix
        let sigma = eigen.eigenvalues[idx].max(0.0).sqrt();
        let u = eigen.eigenvectors.column(idx);
        for i in 0..n {
            scores[(i, c)] = u[i] * sigma;
        }
    }
    scores
}

fn scores_from_covariance(centered: &DMatrix<f64>, k: usize) -> DMatrix<f64> {
    let p = centered.ncols();
    let scatter = centered.transpose() * centered;
    let (eigen, order) = sorted_eigen(scatter);

    let mut components = DMatrix::zeros(p, k);
    for (c, &idx) in order.iter().take(k).enumerate() {
        components.set_column(c, &eigen.eigenvectors.column(idx));
    }
    centered * components
}

/// Flip each column so its largest-magnitude entry is positive.
fn fix_signs(scores: &mut DMatrix<f64>) {
    for mut column in scores.column_iter_mut() {
        let mut pivot = 0.0f64;
        for &v in column.iter() {
            if v.abs() > pivot.abs() {
                pivot = v;
            }
        }
        if pivot < 0.0 {
            column.iter_mut().for_each(|v| *v = -*v);
        }
    }
}
