//! Streaming sanitization pipeline.
//!
//! For each data row: parse → classify → if any error, fix and re-parse →
//! re-check the fixed row for critical defects. Rows that are still
//! critical divert, in their original form, to the misc output; everything
//! else is re-projected onto the canonical reconciled header and written
//! to the primary output. Without an output path the pipeline runs in
//! validation-only mode: rows are classified and logged, nothing is
//! written, and the error count is still returned.

use std::io::Write;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::{info, warn};

use crate::{
    classify::{self, ErrorReport},
    error::{MafError, Result},
    fix,
    header,
    io_utils,
    reconcile::{self, ReconcileOptions, RowProjector},
    record::MafRecord,
    schema::ColumnSchema,
};

/// Sanitizes one MAF file. Returns the number of rows whose initial
/// classification contained at least one error.
///
/// `misc_output` defaults to the output path with `_misc` inserted before
/// the extension; it is only consulted when `output` is given. The misc
/// file carries the identical canonical header as the primary output, so
/// downstream tools can treat either as a normal MAF.
pub fn sanitize(
    input: &Path,
    output: Option<&Path>,
    misc_output: Option<&Path>,
    options: &ReconcileOptions,
) -> Result<usize> {
    let mut reader = io_utils::open_input(input)?;
    let maf_header = header::extract_header(&mut *reader, input)?;
    let schema = ColumnSchema::parse(&maf_header.header_line)?;

    let mut sinks = match output {
        Some(out_path) => {
            let misc_path = misc_output
                .map(Path::to_path_buf)
                .unwrap_or_else(|| misc_filename(out_path));

            let canonical = reconcile::reconcile(&[&schema], options)?;
            let projector = RowProjector::new(&canonical, &schema);

            let mut raw_out = io_utils::open_output(out_path)?;
            io_utils::write_comment_lines(&mut raw_out, &maf_header.comments, out_path)?;
            let mut primary = io_utils::record_writer(raw_out);
            io_utils::write_row(&mut primary, canonical.names())?;

            let raw_misc = io_utils::open_output(&misc_path)?;
            let mut misc = io_utils::record_writer(raw_misc);
            io_utils::write_row(&mut misc, canonical.names())?;

            Some(Sinks {
                projector,
                primary,
                primary_path: out_path.to_path_buf(),
                misc,
                misc_path,
            })
        }
        None => None,
    };

    let header_lines = maf_header.line_count();
    let mut invalid_count = 0usize;

    let mut records = io_utils::record_reader(reader);
    let mut raw = csv::StringRecord::new();

    while records.read_record(&mut raw)? {
        let line_number = raw
            .position()
            .map(|p| header_lines + p.line() as usize)
            .unwrap_or(0);
        let fields: Vec<String> = raw.iter().map(str::to_string).collect();

        if io_utils::is_blank_row(&fields) {
            continue;
        }

        let record = MafRecord::parse(&fields, &schema);
        let report = classify::classify_at(&record, Some(line_number));
        log_diagnostics(&report);

        let fixed = if report.contains_error() {
            invalid_count += 1;
            fix::fix(&schema, &record, &fields, &report)
        } else {
            fields.clone()
        };

        if let Some(sinks) = sinks.as_mut() {
            // re-derive the record from the fixed text; never re-check a
            // stale, partially-fixed record
            let refixed = MafRecord::parse(&fixed, &schema);

            if classify::classify(&refixed).has_critical_error() {
                io_utils::write_row(&mut sinks.misc, &sinks.projector.project(&fields))?;
            } else {
                io_utils::write_row(&mut sinks.primary, &sinks.projector.project(&fixed))?;
            }
        }
    }

    if let Some(mut sinks) = sinks {
        sinks
            .primary
            .flush()
            .map_err(|e| MafError::io(&sinks.primary_path, e))?;
        sinks
            .misc
            .flush()
            .map_err(|e| MafError::io(&sinks.misc_path, e))?;
    }

    info!(
        "Sanitized '{}': {} row(s) with errors and/or warnings",
        input.display(),
        invalid_count
    );

    Ok(invalid_count)
}

struct Sinks {
    projector: RowProjector,
    primary: csv::Writer<Box<dyn Write>>,
    primary_path: PathBuf,
    misc: csv::Writer<Box<dyn Write>>,
    misc_path: PathBuf,
}

/// Default misc-output path: `out.maf` → `out_misc.maf`.
pub fn misc_filename(output: &Path) -> PathBuf {
    match output.extension().and_then(|e| e.to_str()) {
        Some(ext) => {
            let stem = output.file_stem().and_then(|s| s.to_str()).unwrap_or("");
            output.with_file_name(format!("{stem}_misc.{ext}"))
        }
        None => {
            let name = output.file_name().and_then(|s| s.to_str()).unwrap_or("");
            output.with_file_name(format!("{name}_misc"))
        }
    }
}

fn log_diagnostics(report: &ErrorReport) {
    if !report.contains_error() {
        return;
    }

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if report.invalid_chromosome {
        errors.push("invalid chromosome");
    }
    if report.malformed_ref {
        errors.push("invalid ref allele");
    }
    if report.malformed_tum1 && report.malformed_tum2 {
        errors.push("invalid tumor allele");
    }
    if report.missing_start {
        errors.push("invalid start position");
    }

    if report.long_chr_name {
        warnings.push("redundant 'chr' in chromosome name");
    }
    if report.missing_end {
        warnings.push("invalid end position");
    }
    if report.non_adjacent_ins {
        warnings.push("insertion type should have adjacent positions");
    }
    if report.invalid_length {
        warnings.push("ref allele length do not match start-end positions");
    }

    if errors.is_empty() && warnings.is_empty() {
        return;
    }

    let line = report
        .line_number
        .map(|n| n.to_string())
        .unwrap_or_else(|| "-".to_string());
    let mut message = format!("[{line}] ");

    if !errors.is_empty() {
        message.push_str(&format!("ERROR: {}. ", errors.iter().join(";")));
    }
    if !warnings.is_empty() {
        message.push_str(&format!("WARNING: {}.", warnings.iter().join(";")));
    }

    warn!("{}", message.trim_end());
}
