//! File-level batch driver.
//!
//! Sanitization is strictly sequential within one file, but files are
//! fully independent, so a fixed-size worker pool processes one file per
//! task with no shared mutable state. Files that are already annotated,
//! or that have no data rows at all, are skipped.

use std::path::{Path, PathBuf};

use anyhow::Context;
use log::{info, warn};
use rayon::prelude::*;

use crate::{
    error::Result,
    header,
    io_utils,
    reconcile::ReconcileOptions,
    sanitize,
    schema::ColumnSchema,
};

/// Header column written by the external annotator; its presence means the
/// file has already been through the annotation pipeline.
const KNOWN_ANNOTATOR_HEADER: &str = "HGVSp_Short";

/// Per-file outcome of a batch run.
#[derive(Debug)]
pub enum FileOutcome {
    /// File was sanitized; carries the per-file error count.
    Sanitized { errors: usize },
    /// Skipped: header already carries annotator output.
    SkippedAnnotated,
    /// Skipped: no data rows after the header.
    SkippedEmpty,
}

/// True iff the file's header already carries the annotator column.
pub fn is_annotated(path: &Path) -> Result<bool> {
    let mut reader = io_utils::open_input(path)?;
    let maf_header = header::extract_header(&mut *reader, path)?;
    let schema = ColumnSchema::parse(&maf_header.header_line)?;
    Ok(schema.index_of(KNOWN_ANNOTATOR_HEADER).is_some())
}

/// True iff the file has a header but no data rows.
pub fn is_empty_maf(path: &Path) -> Result<bool> {
    let mut reader = io_utils::open_input(path)?;
    header::extract_header(&mut *reader, path)?;

    let mut records = io_utils::record_reader(reader);
    let mut raw = csv::StringRecord::new();
    while records.read_record(&mut raw)? {
        let fields: Vec<String> = raw.iter().map(str::to_string).collect();
        if !io_utils::is_blank_row(&fields) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Sanitizes every input concurrently. With an output directory, each
/// file's sanitized output (and misc side file) lands there under the
/// input's file name; without one the pool runs in validation-only mode.
/// One file's fatal error never aborts the others.
pub fn sanitize_all(
    inputs: &[PathBuf],
    output_dir: Option<&Path>,
    options: &ReconcileOptions,
    jobs: Option<usize>,
) -> anyhow::Result<Vec<(PathBuf, Result<FileOutcome>)>> {
    let workers = jobs.unwrap_or_else(|| num_cpus::get().max(2)).max(1);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .context("Building sanitizer worker pool")?;

    info!(
        "Sanitizing {} file(s) across {} worker(s)",
        inputs.len(),
        workers
    );

    let results = pool.install(|| {
        inputs
            .par_iter()
            .map(|input| (input.clone(), sanitize_one(input, output_dir, options)))
            .collect::<Vec<_>>()
    });

    for (input, outcome) in &results {
        match outcome {
            Ok(FileOutcome::Sanitized { errors }) => {
                info!("✓ {}: {} row(s) with errors", input.display(), errors);
            }
            Ok(FileOutcome::SkippedAnnotated) => {
                info!("- {}: already annotated, skipped", input.display());
            }
            Ok(FileOutcome::SkippedEmpty) => {
                info!("- {}: no data rows, skipped", input.display());
            }
            Err(err) => {
                warn!("✗ {}: {}", input.display(), err);
            }
        }
    }

    Ok(results)
}

fn sanitize_one(
    input: &Path,
    output_dir: Option<&Path>,
    options: &ReconcileOptions,
) -> Result<FileOutcome> {
    if is_annotated(input)? {
        return Ok(FileOutcome::SkippedAnnotated);
    }
    if is_empty_maf(input)? {
        return Ok(FileOutcome::SkippedEmpty);
    }

    let output = output_dir.map(|dir| {
        let name = input.file_name().unwrap_or_default();
        dir.join(name)
    });

    let errors = sanitize::sanitize(input, output.as_deref(), None, options)?;
    Ok(FileOutcome::Sanitized { errors })
}
