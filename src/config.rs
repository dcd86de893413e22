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

use anyhow::{Context, Result, bail};
use clap::Parser;
use k_means::KMeansOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(version, about = "Partition the rows of a delimited numeric table into k clusters")]
pub struct Cli {
    /// Delimited table with one point per row.
    #[arg(long)]
    pub input: PathBuf,
    /// Destination of the cluster id row; stdout when omitted.
    #[arg(long)]
    pub output: Option<PathBuf>,
    #[arg(long)]
    pub k: Option<u32>,
    #[arg(long, alias = "repetition")]
    pub repetitions: Option<u32>,
    #[arg(long)]
    pub seed: Option<u64>,
    /// Appends the assignment of every iteration of the first restart.
    #[arg(long)]
    pub trace: Option<PathBuf>,
    #[arg(long)]
    pub max_iterations: Option<u32>,
    #[arg(long, env = "KMEANS_THREADS")]
    pub threads: Option<u32>,
    /// Writes the final centroids, one per row.
    #[arg(long)]
    pub centroids: Option<PathBuf>,
    /// TOML file with defaults for the clustering options.
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,
}

/// Options read from `--config`; command-line flags take precedence.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub k: Option<u32>,
    pub repetitions: Option<u32>,
    pub seed: Option<u64>,
    pub max_iterations: Option<u32>,
    pub num_threads: Option<u32>,
}

pub fn load(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("failed to parse config {}", path.display()))
}

pub fn resolve(cli: &Cli, file: ConfigFile) -> Result<KMeansOptions> {
    let Some(k) = cli.k.or(file.k) else {
        bail!("k is required: pass --k or set `k` in the config file")
    };
    let mut options = KMeansOptions::new(k);
    if let Some(repetitions) = cli.repetitions.or(file.repetitions) {
        options.repetitions = repetitions;
    }
    if let Some(seed) = cli.seed.or(file.seed) {
        options.seed = seed;
    }
    if let Some(max_iterations) = cli.max_iterations.or(file.max_iterations) {
        options.max_iterations = max_iterations;
    }
    if let Some(num_threads) = cli.threads.or(file.num_threads) {
        options.num_threads = num_threads;
    }
    Ok(options)
}

pub fn delimiter(cli: &Cli) -> Result<u8> {
    if !cli.delimiter.is_ascii() {
        bail!("delimiter {:?} is not a single ASCII character", cli.delimiter);
    }
    Ok(cli.delimiter as u8)
}
