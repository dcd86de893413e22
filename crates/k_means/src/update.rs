// This software is licensed under a dual license model:
//
// GNU Affero General Public License v3 (AGPLv3): You may use, modify, and
// distribute this software under the terms of the AGPLv3.
//
// Elastic License v2 (ELv2): You may also use, modify, and distribute this
// software under the Elastic License v2, which has specific restrictions.
//
// We welcome any commercial collaboration or support. For inquiries
// regarding the licenses, please contact us at:
// vectorchord-inquiry@tensorchord.ai
//
// Copyright (c) 2025 TensorChord Inc.

use crate::error::{KMeansError, Result};
use crate::points::{CentroidSet, PointSet};

/// A cluster that received no points during an update and kept its centroid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegenerateCluster {
    pub iteration: usize,
    pub cluster: usize,
}

/// Recomputes each centroid as the per-dimension mean of its points.
///
/// A cluster with no points keeps its centroid from `previous`; the ids of
/// such clusters are returned alongside the new centroids. Points are summed
/// in index order on the calling thread, so the result is the same bit for
/// bit however the assignment was computed.
pub fn update(
    points: &PointSet,
    targets: &[usize],
    previous: &CentroidSet,
) -> Result<(CentroidSet, Vec<usize>)> {
    if points.d() != previous.d() {
        return Err(KMeansError::dimension_mismatch(
            "centroids",
            distance::DimensionMismatch {
                expected: points.d(),
                found: previous.d(),
            },
        ));
    }
    assert_eq!(targets.len(), points.len());
    let d = points.d();
    let c = previous.len();

    let mut sum = CentroidSet::from_zeros(d, c);
    let mut count = vec![0usize; c];
    for (point, &target) in points.iter().zip(targets) {
        if target >= c {
            return Err(KMeansError::configuration(format!(
                "cluster id {target} is out of range for {c} clusters"
            )));
        }
        vector_add_inplace(&mut sum[target], point);
        count[target] += 1;
    }

    let mut empty = Vec::new();
    for j in 0..c {
        if count[j] == 0 {
            sum[j].copy_from_slice(&previous[j]);
            empty.push(j);
        } else {
            vector_div_scalar_inplace(&mut sum[j], count[j] as f64);
        }
    }
    Ok((sum, empty))
}

fn vector_add_inplace(this: &mut [f64], rhs: &[f64]) {
    for (x, y) in this.iter_mut().zip(rhs) {
        *x += y;
    }
}

fn vector_div_scalar_inplace(this: &mut [f64], scalar: f64) {
    for x in this.iter_mut() {
        *x /= scalar;
    }
}
