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
use distance::DimensionMismatch;

/// Row-major table of points sharing one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    d: usize,
    p: Vec<f64>,
}

/// Centroids are stored exactly like points; row `j` is cluster `j`.
pub type CentroidSet = PointSet;

impl PointSet {
    pub fn d(&self) -> usize {
        self.d
    }
    pub fn len(&self) -> usize {
        self.p.len() / self.d
    }
    pub fn is_empty(&self) -> bool {
        self.p.is_empty()
    }
    pub fn new(d: usize) -> Self {
        assert!(d > 0);
        Self { d, p: Vec::new() }
    }
    pub fn with_capacity(d: usize, n: usize) -> Self {
        assert!(d > 0);
        Self {
            d,
            p: Vec::with_capacity(usize::saturating_mul(d, n)),
        }
    }
    pub fn from_zeros(d: usize, n: usize) -> Self {
        assert!(d > 0);
        Self {
            d,
            p: vec![0.0; d * n],
        }
    }
    /// Builds a set from rows, taking the dimension from the first row.
    pub fn from_rows<R: AsRef<[f64]>>(rows: impl IntoIterator<Item = R>) -> Result<Self> {
        let mut rows = rows.into_iter();
        let Some(first) = rows.next() else {
            return Err(KMeansError::configuration("dataset is empty"));
        };
        let first = first.as_ref();
        if first.is_empty() {
            return Err(KMeansError::configuration("row 0 has no coordinates"));
        }
        let mut result = Self::new(first.len());
        result.p.extend_from_slice(first);
        for (i, row) in rows.enumerate() {
            result
                .push_slice(row.as_ref())
                .map_err(|e| KMeansError::dimension_mismatch(format!("row {}", i + 1), e))?;
        }
        result.check_finite()?;
        Ok(result)
    }
    /// Rejects NaN and infinite coordinates, naming the first offending row.
    pub fn check_finite(&self) -> Result<()> {
        match self.p.iter().position(|x| !x.is_finite()) {
            Some(i) => Err(KMeansError::configuration(format!(
                "row {} has a non-finite coordinate {}",
                i / self.d,
                self.p[i]
            ))),
            None => Ok(()),
        }
    }
    pub fn push_slice(&mut self, slice: &[f64]) -> std::result::Result<(), DimensionMismatch> {
        if slice.len() != self.d {
            return Err(DimensionMismatch {
                expected: self.d,
                found: slice.len(),
            });
        }
        self.p.extend_from_slice(slice);
        Ok(())
    }
    pub fn as_slice(&self) -> &[f64] {
        &self.p
    }
    pub fn iter(&self) -> std::slice::ChunksExact<'_, f64> {
        self.p.chunks_exact(self.d)
    }
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter().map(<[f64]>::to_vec).collect()
    }
}

impl std::ops::Index<usize> for PointSet {
    type Output = [f64];

    fn index(&self, index: usize) -> &Self::Output {
        &self.p[self.d * index..][..self.d]
    }
}

impl std::ops::IndexMut<usize> for PointSet {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.p[self.d * index..][..self.d]
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a [f64];

    type IntoIter = std::slice::ChunksExact<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.p.chunks_exact(self.d)
    }
}
