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
use k_means::{CentroidSet, PointSet};
use std::io::{Read, Write};

fn reader_builder(delimiter: u8) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(delimiter);
    builder
}

fn writer_builder(delimiter: u8) -> csv::WriterBuilder {
    let mut builder = csv::WriterBuilder::new();
    builder.has_headers(false).delimiter(delimiter);
    builder
}

/// Reads one point per row. Every row must have the same number of fields.
pub fn read_points(reader: impl Read, delimiter: u8) -> Result<PointSet> {
    let mut reader = reader_builder(delimiter).from_reader(reader);
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        let row = record
            .iter()
            .enumerate()
            .map(|(j, field)| {
                field.parse::<f64>().with_context(|| {
                    format!("line {line}, field {}: {field:?} is not a number", j + 1)
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }
    if rows.is_empty() {
        bail!("input contains no rows");
    }
    Ok(PointSet::from_rows(&rows)?)
}

/// Writes the assignment as a single row of cluster ids.
pub fn write_assignment(writer: impl Write, assignment: &[usize], delimiter: u8) -> Result<()> {
    let mut writer = writer_builder(delimiter).from_writer(writer);
    writer.write_record(assignment.iter().map(usize::to_string))?;
    writer.flush()?;
    Ok(())
}

/// Writes one row per centroid, in cluster id order.
pub fn write_centroids(writer: impl Write, centroids: &CentroidSet, delimiter: u8) -> Result<()> {
    let mut writer = writer_builder(delimiter).from_writer(writer);
    for centroid in centroids {
        writer.write_record(centroid.iter().map(f64::to_string))?;
    }
    writer.flush()?;
    Ok(())
}

/// Appends one assignment row per iteration, flushing as it goes.
pub struct TraceWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> TraceWriter<W> {
    pub fn new(writer: W, delimiter: u8) -> Self {
        Self {
            writer: writer_builder(delimiter).from_writer(writer),
        }
    }

    pub fn append(&mut self, assignment: &[usize]) -> std::io::Result<()> {
        self.writer
            .write_record(assignment.iter().map(usize::to_string))?;
        self.writer.flush()
    }
}
