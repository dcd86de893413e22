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

use thiserror::Error;

/// Two vectors that were expected to share a dimension did not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("dimension mismatch: expected {expected}, found {found}")]
pub struct DimensionMismatch {
    pub expected: usize,
    pub found: usize,
}

#[inline]
pub fn check(lhs: &[f64], rhs: &[f64]) -> Result<(), DimensionMismatch> {
    if lhs.len() != rhs.len() {
        return Err(DimensionMismatch {
            expected: lhs.len(),
            found: rhs.len(),
        });
    }
    Ok(())
}

/// Squared Euclidean distance. Callers must have checked the dimensions.
#[inline]
pub fn reduce_sum_of_d2(lhs: &[f64], rhs: &[f64]) -> f64 {
    assert_eq!(lhs.len(), rhs.len());
    let n = lhs.len();
    let mut d2 = 0.0;
    for i in 0..n {
        let d = lhs[i] - rhs[i];
        d2 += d * d;
    }
    d2
}

#[inline]
pub fn squared_euclidean(lhs: &[f64], rhs: &[f64]) -> Result<f64, DimensionMismatch> {
    check(lhs, rhs)?;
    Ok(reduce_sum_of_d2(lhs, rhs))
}

#[inline]
pub fn euclidean(lhs: &[f64], rhs: &[f64]) -> Result<f64, DimensionMismatch> {
    check(lhs, rhs)?;
    Ok(reduce_sum_of_d2(lhs, rhs).sqrt())
}

#[test]
fn euclidean_of_known_vectors() {
    assert_eq!(euclidean(&[0.0, 0.0], &[3.0, 4.0]), Ok(5.0));
    assert_eq!(euclidean(&[1.5, -2.0, 7.0], &[1.5, -2.0, 7.0]), Ok(0.0));
    assert_eq!(squared_euclidean(&[1.0], &[-1.0]), Ok(4.0));
    assert_eq!(euclidean(&[], &[]), Ok(0.0));
}

#[test]
fn dimension_mismatch_is_reported() {
    assert_eq!(
        euclidean(&[0.0, 1.0], &[0.0, 1.0, 2.0]),
        Err(DimensionMismatch {
            expected: 2,
            found: 3
        })
    );
    assert_eq!(
        squared_euclidean(&[0.0], &[]),
        Err(DimensionMismatch {
            expected: 1,
            found: 0
        })
    );
    let message = euclidean(&[0.0; 4], &[0.0; 2]).unwrap_err().to_string();
    assert_eq!(message, "dimension mismatch: expected 4, found 2");
}

#[test]
fn euclidean_is_symmetric() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..1000 {
        let d = rng.random_range(1..32);
        let a: Vec<f64> = (0..d).map(|_| rng.random_range(-1000.0..1000.0)).collect();
        let b: Vec<f64> = (0..d).map(|_| rng.random_range(-1000.0..1000.0)).collect();
        let ab = euclidean(&a, &b).unwrap();
        let ba = euclidean(&b, &a).unwrap();
        assert_eq!(ab.to_bits(), ba.to_bits());
        assert!(ab >= 0.0);
        let d2 = squared_euclidean(&a, &b).unwrap();
        assert!((ab * ab - d2).abs() <= 1e-9 * d2.max(1.0));
    }
}
