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

pub mod assign;
pub mod cost;
pub mod error;
pub mod init;
pub mod lloyd;
pub mod options;
pub mod points;
pub mod update;

pub use assign::k_means_lookup;
pub use error::{KMeansError, Result};
pub use lloyd::{Run, Termination};
pub use options::KMeansOptions;
pub use points::{CentroidSet, PointSet};
pub use update::DegenerateCluster;

use lloyd::Lloyd;
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use validator::Validate;

/// Best restart of a clustering, together with the cost of every restart.
#[derive(Debug, Clone)]
pub struct Clustering {
    pub best: Run,
    pub best_restart: usize,
    pub costs: Vec<f64>,
}

/// Clusters `points` into `options.k` groups, keeping the cheapest of
/// `options.repetitions` restarts. Ties keep the earlier restart.
///
/// One generator, seeded once from `options.seed`, feeds every restart's
/// initial centroids in turn. `trace` receives the assignment after each
/// iteration of the first restart only.
pub fn k_means(
    points: &PointSet,
    options: &KMeansOptions,
    mut trace: impl FnMut(&[usize]) -> std::io::Result<()>,
) -> Result<Clustering> {
    options.validate()?;
    if points.is_empty() {
        return Err(KMeansError::configuration("dataset is empty"));
    }
    points.check_finite()?;
    let n = points.len();
    let k = options.k as usize;
    if k > n {
        return Err(KMeansError::configuration(format!(
            "k ({k}) exceeds the number of points ({n})"
        )));
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.num_threads as usize)
        .build()?;
    let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
    let max_iterations = options.max_iterations as usize;

    let first = restart(&pool, &mut rng, points, k, max_iterations, &mut trace)?;
    summarize(0, &first);
    let mut costs = vec![first.cost];
    let (mut best_restart, mut best) = (0, first);
    for i in 1..options.repetitions as usize {
        let run = restart(&pool, &mut rng, points, k, max_iterations, |_| Ok(()))?;
        summarize(i, &run);
        costs.push(run.cost);
        if run.cost < best.cost {
            debug!("restart {i} improves cost from {} to {}", best.cost, run.cost);
            (best_restart, best) = (i, run);
        }
    }
    info!("best restart is {best_restart} with cost {}", best.cost);
    Ok(Clustering {
        best,
        best_restart,
        costs,
    })
}

fn restart(
    pool: &rayon::ThreadPool,
    rng: &mut ChaCha8Rng,
    points: &PointSet,
    k: usize,
    max_iterations: usize,
    trace: impl FnMut(&[usize]) -> std::io::Result<()>,
) -> Result<Run> {
    let centroids = init::init_centroids(rng, points, k)?;
    Lloyd::new(pool, points, centroids, max_iterations)?.run(trace)
}

fn summarize(i: usize, run: &Run) {
    info!(
        "restart {i}: cost {} after {} iterations ({:?}, {} empty clusters)",
        run.cost,
        run.iterations,
        run.termination,
        run.degenerate.len()
    );
}
