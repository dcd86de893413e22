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
use rand::Rng;

/// Draws `k` points uniformly, with replacement, as the starting centroids.
///
/// The generator is borrowed rather than seeded here, so consecutive calls
/// continue one sequence.
pub fn init_centroids(rng: &mut impl Rng, points: &PointSet, k: usize) -> Result<CentroidSet> {
    if k == 0 {
        return Err(KMeansError::configuration("k must be positive"));
    }
    if points.is_empty() {
        return Err(KMeansError::configuration("dataset is empty"));
    }
    let n = points.len();
    let mut centroids = CentroidSet::with_capacity(points.d(), k);
    for _ in 0..k {
        let index = rng.random_range(0..n);
        centroids
            .push_slice(&points[index])
            .map_err(|e| KMeansError::dimension_mismatch("initial centroid", e))?;
    }
    Ok(centroids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn points() -> PointSet {
        PointSet::from_rows((0..10).map(|i| [i as f64, -(i as f64)])).unwrap()
    }

    #[test]
    fn same_seed_same_centroids() {
        let points = points();
        let a = init_centroids(&mut ChaCha8Rng::seed_from_u64(42), &points, 4).unwrap();
        let b = init_centroids(&mut ChaCha8Rng::seed_from_u64(42), &points, 4).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 4);
        for centroid in &a {
            assert!(points.iter().any(|p| p == centroid));
        }
    }

    #[test]
    fn sequence_continues_across_calls() {
        let points = points();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let first = init_centroids(&mut rng, &points, 3).unwrap();
        let second = init_centroids(&mut rng, &points, 3).unwrap();
        let mut fresh = ChaCha8Rng::seed_from_u64(42);
        let both = init_centroids(&mut fresh, &points, 6).unwrap();
        assert_eq!(first.as_slice(), &both.as_slice()[..6]);
        assert_eq!(second.as_slice(), &both.as_slice()[6..]);
    }

    #[test]
    fn duplicates_are_allowed() {
        let points = PointSet::from_rows([[1.0, 2.0]]).unwrap();
        let centroids = init_centroids(&mut ChaCha8Rng::seed_from_u64(0), &points, 3).unwrap();
        assert_eq!(centroids.as_slice(), &[1.0, 2.0, 1.0, 2.0, 1.0, 2.0]);
    }

    #[test]
    fn rejects_zero_k() {
        let points = points();
        assert!(matches!(
            init_centroids(&mut ChaCha8Rng::seed_from_u64(0), &points, 0),
            Err(KMeansError::Configuration(_))
        ));
        assert!(matches!(
            init_centroids(&mut ChaCha8Rng::seed_from_u64(0), &PointSet::new(2), 1),
            Err(KMeansError::Configuration(_))
        ));
    }
}
