// Column standardization (zero mean, unit variance).
//
// Statistics come from the matrix being transformed; there is no reference
// distribution. Population standard deviation (divide by n) is used.
// Columns whose variance is zero become all zeros instead of dividing by zero.

use nalgebra::DMatrix;

use super::traits::Scaler;
use crate::error::{ClusterError, Result};

/// Standard deviations at or below this are treated as zero.
const ZERO_STD: f64 = 1e-10;

/// Zero-mean, unit-variance scaler.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardScaler;

impl StandardScaler {
    pub fn new() -> Self {
        Self
    }
}

impl Scaler for StandardScaler {
    fn fit_transform(&self, x: &DMatrix<f64>) -> Result<DMatrix<f64>> {
        let (n_samples, n_features) = x.shape();
        if n_samples == 0 {
            return Err(ClusterError::DimensionMismatch {
                stage: "standardize",
                expected: 1,
                found: 0,
            });
        }

        let mut scaled = DMatrix::zeros(n_samples, n_features);

        for (j, column) in x.column_iter().enumerate() {
            let values: Vec<f64> = column.iter().copied().collect();
            let (mean, std) = mean_and_std(&values);
            if std <= ZERO_STD {
                // Constant feature: leave the column at zero
                continue;
            }
            for (i, value) in values.iter().enumerate() {
                scaled[(i, j)] = (value - mean) / std;
            }
        }

        Ok(scaled)
    }
}

/// Number of columns whose values are all (numerically) identical.
pub fn zero_variance_columns(x: &DMatrix<f64>) -> usize {
    if x.nrows() == 0 {
        return 0;
    }
    x.column_iter()
        .filter(|column| {
            let values: Vec<f64> = column.iter().copied().collect();
            mean_and_std(&values).1 <= ZERO_STD
        })
        .count()
}

fn mean_and_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    (mean, var.sqrt())
}
