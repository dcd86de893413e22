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

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct KMeansOptions {
    /// Number of clusters.
    #[validate(range(min = 1))]
    pub k: u32,
    /// Number of independent restarts; the lowest-cost one wins.
    #[serde(default = "KMeansOptions::default_repetitions")]
    #[validate(range(min = 1))]
    pub repetitions: u32,
    /// Seeds the generator once for the whole run, never per restart.
    #[serde(default = "KMeansOptions::default_seed")]
    pub seed: u64,
    #[serde(default = "KMeansOptions::default_max_iterations")]
    #[validate(range(min = 1))]
    pub max_iterations: u32,
    /// Workers used by the assignment step.
    #[serde(default = "KMeansOptions::default_num_threads")]
    #[validate(range(min = 1, max = 256))]
    pub num_threads: u32,
}

impl KMeansOptions {
    pub fn new(k: u32) -> Self {
        Self {
            k,
            repetitions: Self::default_repetitions(),
            seed: Self::default_seed(),
            max_iterations: Self::default_max_iterations(),
            num_threads: Self::default_num_threads(),
        }
    }
    pub fn default_repetitions() -> u32 {
        1
    }
    pub fn default_seed() -> u64 {
        1850493
    }
    pub fn default_max_iterations() -> u32 {
        500
    }
    pub fn default_num_threads() -> u32 {
        std::thread::available_parallelism()
            .map(|n| n.get().min(256) as u32)
            .unwrap_or(1)
    }
}
