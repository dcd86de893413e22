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

use crate::assign::assign;
use crate::cost::{cost, inertia};
use crate::error::{KMeansError, Result};
use crate::points::{CentroidSet, PointSet};
use crate::update::{DegenerateCluster, update};
use log::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Initialized,
    Iterating,
    Converged,
    IterationCapReached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Converged,
    IterationCapReached,
}

/// Cost and inertia of an assignment against the centroids updated from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub cost: f64,
    pub inertia: f64,
}

/// Outcome of a single restart.
#[derive(Debug, Clone)]
pub struct Run {
    pub centroids: CentroidSet,
    /// Assignment the final centroids were computed from. After the cap is
    /// hit it was made against the previous centroids, not the final ones.
    pub assignment: Vec<usize>,
    pub cost: f64,
    pub iterations: usize,
    pub termination: Termination,
    pub degenerate: Vec<DegenerateCluster>,
    pub history: Vec<Step>,
}

pub struct Lloyd<'a> {
    pool: &'a rayon::ThreadPool,
    points: &'a PointSet,
    max_iterations: usize,
    state: State,
    centroids: CentroidSet,
    targets: Vec<usize>,
    iterations: usize,
    degenerate: Vec<DegenerateCluster>,
    history: Vec<Step>,
}

impl<'a> Lloyd<'a> {
    pub fn new(
        pool: &'a rayon::ThreadPool,
        points: &'a PointSet,
        centroids: CentroidSet,
        max_iterations: usize,
    ) -> Result<Self> {
        if max_iterations == 0 {
            return Err(KMeansError::configuration("iteration cap must be positive"));
        }
        if centroids.is_empty() {
            return Err(KMeansError::configuration("k must be positive"));
        }
        if points.is_empty() {
            return Err(KMeansError::configuration("dataset is empty"));
        }
        if points.d() != centroids.d() {
            return Err(KMeansError::dimension_mismatch(
                "initial centroids",
                distance::DimensionMismatch {
                    expected: points.d(),
                    found: centroids.d(),
                },
            ));
        }
        Ok(Self {
            pool,
            points,
            max_iterations,
            state: State::Initialized,
            centroids,
            targets: vec![0; points.len()],
            iterations: 0,
            degenerate: Vec::new(),
            history: Vec::new(),
        })
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn centroids(&self) -> &CentroidSet {
        &self.centroids
    }

    /// Assignment computed by the latest pass.
    pub fn assignment(&self) -> &[usize] {
        &self.targets
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    fn is_terminal(&self) -> bool {
        matches!(self.state, State::Converged | State::IterationCapReached)
    }

    /// Runs one assign/update pass and reports whether the loop has stopped.
    pub fn iterate(&mut self) -> Result<bool> {
        if self.is_terminal() {
            return Ok(true);
        }
        self.state = State::Iterating;

        assign(self.pool, self.points, &self.centroids, &mut self.targets)?;
        let (candidate, empty) = update(self.points, &self.targets, &self.centroids)?;
        self.iterations += 1;

        for cluster in empty {
            debug!(
                "cluster {cluster} is empty at iteration {}, keeping its centroid",
                self.iterations
            );
            self.degenerate.push(DegenerateCluster {
                iteration: self.iterations,
                cluster,
            });
        }
        self.history.push(Step {
            cost: cost(self.points, &self.targets, &candidate)?,
            inertia: inertia(self.points, &self.targets, &candidate)?,
        });

        if candidate == self.centroids {
            self.state = State::Converged;
        } else {
            self.centroids = candidate;
            if self.iterations >= self.max_iterations {
                warn!(
                    "no fixed point after {} iterations, accepting current centroids",
                    self.iterations
                );
                self.state = State::IterationCapReached;
            }
        }
        Ok(self.is_terminal())
    }

    /// Iterates until the loop stops, handing every assignment to `trace`.
    pub fn run(mut self, mut trace: impl FnMut(&[usize]) -> std::io::Result<()>) -> Result<Run> {
        loop {
            let done = self.iterate()?;
            trace(&self.targets).map_err(KMeansError::Trace)?;
            if done {
                break;
            }
        }
        self.finish()
    }

    fn finish(self) -> Result<Run> {
        let termination = match self.state {
            State::Converged => Termination::Converged,
            State::IterationCapReached => Termination::IterationCapReached,
            State::Initialized | State::Iterating => unreachable!(),
        };
        let cost = cost(self.points, &self.targets, &self.centroids)?;
        Ok(Run {
            centroids: self.centroids,
            assignment: self.targets,
            cost,
            iterations: self.iterations,
            termination,
            degenerate: self.degenerate,
            history: self.history,
        })
    }
}
