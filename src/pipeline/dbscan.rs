// DBSCAN density-based clustering over matrix rows, backed by linfa.
//
// A row is a core point when at least `min_samples` rows (itself included)
// lie within Euclidean distance `epsilon`, boundary inclusive. Clusters grow
// outward from core points; non-core rows reached from a core point become
// border members of the first cluster that reaches them. Everything else is
// noise.
//
// Rows are visited in order, so cluster ids are assigned 0, 1, 2, ... by first
// core point, and the partition is fully determined by the input.

use std::collections::HashMap;

use linfa::traits::Transformer;
use linfa_clustering::{Dbscan as LinfaDbscan, DbscanParamsError};
use nalgebra::DMatrix;
use ndarray::Array2;
use tracing::debug;

use super::traits::Clusterer;
use crate::error::{ClusterError, Result};

/// Label for rows not assigned to any cluster.
pub const NOISE: i32 = -1;

// linfa refuses `min_points < 2`; a threshold of one is run at two and
// isolated rows are then given clusters of their own.
const LINFA_MIN_POINTS: usize = 2;

#[derive(Debug, Clone)]
pub struct Dbscan {
    epsilon: f64,
    min_samples: usize,
}

impl Dbscan {
    pub fn new(epsilon: f64, min_samples: usize) -> Self {
        Self {
            epsilon,
            min_samples,
        }
    }

    fn check_params(&self) -> Result<()> {
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

impl Clusterer for Dbscan {
    fn cluster(&self, x: &DMatrix<f64>) -> Result<Vec<i32>> {
        self.check_params()?;

        let records = Array2::from_shape_fn(x.shape(), |(i, j)| x[(i, j)]);
        let min_points = self.min_samples.max(LINFA_MIN_POINTS);
        let memberships = LinfaDbscan::params(min_points)
            .tolerance(self.epsilon)
            .transform(&records)
            .map_err(|e| match e {
                DbscanParamsError::MinPoints => ClusterError::InvalidParameter {
                    name: "min_samples",
                    message: e.to_string(),
                },
                DbscanParamsError::Tolerance => ClusterError::InvalidParameter {
                    name: "epsilon",
                    message: e.to_string(),
                },
            })?;

        let labels = if self.min_samples < LINFA_MIN_POINTS {
            every_row_core(memberships.iter())
        } else {
            memberships
                .iter()
                .map(|m| m.map_or(NOISE, |c| c as i32))
                .collect()
        };

        debug!(
            epsilon = self.epsilon,
            min_samples = self.min_samples,
            clusters = labels.iter().filter(|&&l| l != NOISE).max().map_or(0, |&l| l + 1),
            noise = labels.iter().filter(|&&l| l == NOISE).count(),
            "DBSCAN finished"
        );

        Ok(labels)
    }
}

/// Labels for `min_samples == 1`, where every row is a core point.
///
/// Rows linfa left unassigned have no neighbor and form singleton clusters.
/// Ids are renumbered by first row so they still follow input order.
fn every_row_core<'a>(memberships: impl Iterator<Item = &'a Option<usize>>) -> Vec<i32> {
    let mut next = 0;
    let mut renumbered: HashMap<usize, i32> = HashMap::new();
    let mut fresh = || {
        let id = next;
        next += 1;
        id
    };
    memberships
        .map(|m| match m {
            Some(c) => *renumbered.entry(*c).or_insert_with(&mut fresh),
            None => fresh(),
        })
        .collect()
}
