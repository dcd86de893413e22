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

use distance::DimensionMismatch;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KMeansError {
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("{context}: {source}")]
    DimensionMismatch {
        context: String,
        #[source]
        source: DimensionMismatch,
    },
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("failed to emit trace: {0}")]
    Trace(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, KMeansError>;

impl KMeansError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub(crate) fn dimension_mismatch(
        context: impl Into<String>,
        source: DimensionMismatch,
    ) -> Self {
        Self::DimensionMismatch {
            context: context.into(),
            source,
        }
    }
}

impl From<validator::ValidationErrors> for KMeansError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Configuration(errors.to_string())
    }
}
