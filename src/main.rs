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

mod config;
mod table;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::time::Instant;
use table::TraceWriter;

#[cfg(all(
    any(target_arch = "x86_64", target_arch = "aarch64"),
    target_os = "linux"
))]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = config::Cli::parse();
    let file = match &cli.config {
        Some(path) => config::load(path)?,
        None => config::ConfigFile::default(),
    };
    let options = config::resolve(&cli, file)?;
    let delimiter = config::delimiter(&cli)?;

    let start = Instant::now();
    let points = {
        let input = File::open(&cli.input)
            .with_context(|| format!("failed to open {}", cli.input.display()))?;
        table::read_points(BufReader::new(input), delimiter)
            .with_context(|| format!("failed to read {}", cli.input.display()))?
    };
    info!(
        "loaded {} points of dimension {} in {:?}",
        points.len(),
        points.d(),
        start.elapsed()
    );

    let mut trace = match &cli.trace {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Some(TraceWriter::new(BufWriter::new(file), delimiter))
        }
        None => None,
    };
    let start = Instant::now();
    let clustering = k_means::k_means(&points, &options, |assignment| match trace.as_mut() {
        Some(trace) => trace.append(assignment),
        None => Ok(()),
    })?;
    info!(
        "clustered {} points into {} clusters in {:?}",
        points.len(),
        options.k,
        start.elapsed()
    );

    let best = &clustering.best;
    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            table::write_assignment(BufWriter::new(file), &best.assignment, delimiter)?;
        }
        None => table::write_assignment(std::io::stdout().lock(), &best.assignment, delimiter)?,
    }
    if let Some(path) = &cli.centroids {
        let file =
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        table::write_centroids(BufWriter::new(file), &best.centroids, delimiter)?;
    }
    Ok(())
}
