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
use rayon::prelude::*;
use std::ops::Range;

/// Splits `0..n` into at most `workers` contiguous ranges in ascending order.
pub fn partition(n: usize, workers: usize) -> Vec<Range<usize>> {
    assert!(workers > 0);
    let chunk = n.div_ceil(workers).max(1);
    (0..n)
        .step_by(chunk)
        .map(|start| start..std::cmp::min(start + chunk, n))
        .collect()
}

/// Index of the nearest centroid. Ties go to the later centroid.
pub fn k_means_lookup(point: &[f64], centroids: &CentroidSet) -> usize {
    assert_ne!(centroids.len(), 0);
    let mut result = (f64::INFINITY, 0);
    for (i, centroid) in centroids.iter().enumerate() {
        let dis = distance::reduce_sum_of_d2(point, centroid).sqrt();
        if dis <= result.0 {
            result = (dis, i);
        }
    }
    result.1
}

/// Writes the nearest centroid of every point into `targets`.
///
/// Each worker of `pool` owns one contiguous range of points and writes only
/// the matching region of `targets`, so the stage needs no merge and no
/// locking. Returning from `install` is the join point.
pub fn assign(
    pool: &rayon::ThreadPool,
    points: &PointSet,
    centroids: &CentroidSet,
    targets: &mut [usize],
) -> Result<()> {
    if points.d() != centroids.d() {
        return Err(KMeansError::dimension_mismatch(
            "centroids",
            distance::DimensionMismatch {
                expected: points.d(),
                found: centroids.d(),
            },
        ));
    }
    if centroids.is_empty() {
        return Err(KMeansError::configuration("no centroids to assign to"));
    }
    assert_eq!(targets.len(), points.len());
    let ranges = partition(points.len(), pool.current_num_threads());
    let mut regions = Vec::with_capacity(ranges.len());
    let mut rest = targets;
    for range in ranges.iter() {
        let head;
        (head, rest) = std::mem::take(&mut rest).split_at_mut(range.len());
        regions.push(head);
    }
    pool.install(|| {
        ranges
            .into_par_iter()
            .zip(regions)
            .for_each(|(range, region)| {
                for (target, i) in region.iter_mut().zip(range) {
                    *target = k_means_lookup(&points[i], centroids);
                }
            });
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn pool(num_threads: usize) -> rayon::ThreadPool {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .unwrap()
    }

    fn random_points(rng: &mut impl Rng, d: usize, n: usize) -> PointSet {
        let mut points = PointSet::with_capacity(d, n);
        for _ in 0..n {
            let row: Vec<f64> = (0..d).map(|_| rng.random_range(-100.0..100.0)).collect();
            points.push_slice(&row).unwrap();
        }
        points
    }

    #[test]
    fn partition_is_contiguous_and_ordered() {
        for n in [0, 1, 5, 6, 7, 100, 1001] {
            for workers in 1..=9 {
                let ranges = partition(n, workers);
                assert!(ranges.len() <= workers);
                let mut next = 0;
                for range in &ranges {
                    assert_eq!(range.start, next, "n {n}, workers {workers}");
                    assert!(range.end > range.start);
                    next = range.end;
                }
                assert_eq!(next, n);
            }
        }
    }

    #[test]
    fn worker_count_does_not_change_assignment() {
        let mut rng = StdRng::seed_from_u64(7);
        for trial in 0..20 {
            let d = rng.random_range(1..8);
            let n = rng.random_range(1..500);
            let c = rng.random_range(1..=n.min(16));
            let points = random_points(&mut rng, d, n);
            let centroids = random_points(&mut rng, d, c);
            let serial: Vec<usize> = points
                .iter()
                .map(|p| k_means_lookup(p, &centroids))
                .collect();
            for workers in [1, 2, 3, 6, 13] {
                let mut targets = vec![usize::MAX; n];
                assign(&pool(workers), &points, &centroids, &mut targets).unwrap();
                assert_eq!(targets, serial, "trial {trial}, workers {workers}");
            }
        }
    }

    #[test]
    fn fewer_points_than_workers() {
        let points = PointSet::from_rows([[0.0], [10.0]]).unwrap();
        let centroids = CentroidSet::from_rows([[9.0], [1.0]]).unwrap();
        let mut targets = vec![usize::MAX; 2];
        assign(&pool(6), &points, &centroids, &mut targets).unwrap();
        assert_eq!(targets, vec![1, 0]);
    }

    #[test]
    fn ties_go_to_later_centroid() {
        let centroids = CentroidSet::from_rows([[-1.0, 0.0], [1.0, 0.0]]).unwrap();
        assert_eq!(k_means_lookup(&[0.0, 0.0], &centroids), 1);
        assert_eq!(k_means_lookup(&[0.0, 5.0], &centroids), 1);
        assert_eq!(k_means_lookup(&[-0.5, 0.0], &centroids), 0);
        let duplicated = CentroidSet::from_rows([[3.0], [3.0], [3.0]]).unwrap();
        assert_eq!(k_means_lookup(&[3.0], &duplicated), 2);
    }

    #[test]
    fn point_on_centroid_is_a_candidate() {
        let centroids = CentroidSet::from_rows([[0.0, 0.0], [10.0, 0.0]]).unwrap();
        assert_eq!(k_means_lookup(&[0.0, 0.0], &centroids), 0);
        assert_eq!(k_means_lookup(&[10.0, 0.0], &centroids), 1);
    }

    #[test]
    fn dimension_mismatch_is_fatal() {
        let points = PointSet::from_rows([[0.0, 0.0]]).unwrap();
        let centroids = CentroidSet::from_rows([[0.0, 0.0, 0.0]]).unwrap();
        let mut targets = vec![0; 1];
        assert!(matches!(
            assign(&pool(2), &points, &centroids, &mut targets),
            Err(KMeansError::DimensionMismatch { .. })
        ));
    }
}
