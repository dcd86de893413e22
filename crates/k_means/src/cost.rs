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

/// Sum of Euclidean distances from every point to its assigned centroid.
pub fn cost(points: &PointSet, targets: &[usize], centroids: &CentroidSet) -> Result<f64> {
    reduce(points, targets, centroids, f64::sqrt)
}

/// Sum of squared Euclidean distances, the quantity a Lloyd iteration never
/// increases.
pub fn inertia(points: &PointSet, targets: &[usize], centroids: &CentroidSet) -> Result<f64> {
    reduce(points, targets, centroids, |d2| d2)
}

fn reduce(
    points: &PointSet,
    targets: &[usize],
    centroids: &CentroidSet,
    f: impl Fn(f64) -> f64,
) -> Result<f64> {
    if points.d() != centroids.d() {
        return Err(KMeansError::dimension_mismatch(
            "centroids",
            distance::DimensionMismatch {
                expected: points.d(),
                found: centroids.d(),
            },
        ));
    }
    if targets.len() != points.len() {
        return Err(KMeansError::configuration(format!(
            "assignment covers {} points, dataset has {}",
            targets.len(),
            points.len()
        )));
    }
    let c = centroids.len();
    let mut total = 0.0;
    for (point, &target) in points.iter().zip(targets) {
        if target >= c {
            return Err(KMeansError::configuration(format!(
                "cluster id {target} is out of range for {c} clusters"
            )));
        }
        total += f(distance::reduce_sum_of_d2(point, &centroids[target]));
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_sums_plain_distances() {
        let points =
            PointSet::from_rows([[0.0, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]]).unwrap();
        let centroids = CentroidSet::from_rows([[0.0, 0.5], [10.0, 0.5]]).unwrap();
        let targets = [0, 0, 1, 1];
        assert_eq!(cost(&points, &targets, &centroids).unwrap(), 2.0);
        assert_eq!(inertia(&points, &targets, &centroids).unwrap(), 1.0);
    }

    #[test]
    fn cost_uses_assigned_centroid_only() {
        let points = PointSet::from_rows([[0.0, 0.0], [3.0, 4.0]]).unwrap();
        let centroids = CentroidSet::from_rows([[0.0, 0.0], [3.0, 4.0]]).unwrap();
        assert_eq!(cost(&points, &[0, 1], &centroids).unwrap(), 0.0);
        assert_eq!(cost(&points, &[1, 0], &centroids).unwrap(), 10.0);
        assert_eq!(inertia(&points, &[1, 0], &centroids).unwrap(), 50.0);
    }

    #[test]
    fn rejects_malformed_assignment() {
        let points = PointSet::from_rows([[0.0], [1.0]]).unwrap();
        let centroids = CentroidSet::from_rows([[0.0]]).unwrap();
        assert!(cost(&points, &[0], &centroids).is_err());
        assert!(cost(&points, &[0, 1], &centroids).is_err());
    }
}
