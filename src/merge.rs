//! Two-file merge onto a fixed union schema.
//!
//! The union schema is the target schema with any source-only columns
//! appended at the end; target rows keep their column order and content,
//! source rows are re-projected onto the same, already-fixed union.

use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;

use crate::{
    error::{MafError, Result},
    header,
    io_utils,
    reconcile::{self, ReconcileOptions, RowProjector},
    schema::ColumnSchema,
};

/// Merges `source` into `target`, writing `<target>.merged` unless an
/// explicit output path is given. Returns the merged file's path.
pub fn merge(target: &Path, source: &Path, output: Option<&Path>) -> Result<PathBuf> {
    let merged_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(format!("{}.merged", target.display())));

    let mut target_reader = io_utils::open_input(target)?;
    let target_header = header::extract_header(&mut *target_reader, target)?;
    let target_schema = ColumnSchema::parse(&target_header.header_line)?;

    let mut source_reader = io_utils::open_input(source)?;
    let source_header = header::extract_header(&mut *source_reader, source)?;
    let source_schema = ColumnSchema::parse(&source_header.header_line)?;

    // source columns absent from the target become trailing union columns
    let additional: Vec<String> = source_schema
        .names()
        .iter()
        .filter(|name| !name.is_empty() && !target_schema.contains_ignore_case(name))
        .cloned()
        .collect();

    let options = ReconcileOptions {
        sort: false,
        add_missing: false,
        extra_columns: additional,
        excluded_columns: Vec::new(),
    };
    let union = reconcile::reconcile(&[&target_schema], &options)?;

    let mut raw_out = io_utils::open_output(&merged_path)?;
    io_utils::write_comment_lines(&mut raw_out, &target_header.comments, &merged_path)?;
    let mut writer = io_utils::record_writer(raw_out);
    io_utils::write_row(&mut writer, union.names())?;

    let target_rows = copy_projected(
        target_reader,
        &mut writer,
        &RowProjector::new(&union, &target_schema),
    )?;
    let source_rows = copy_projected(
        source_reader,
        &mut writer,
        &RowProjector::new(&union, &source_schema),
    )?;

    writer
        .flush()
        .map_err(|e| MafError::io(&merged_path, e))?;

    info!(
        "Merged '{}' into '{}': {} + {} row(s) -> '{}'",
        source.display(),
        target.display(),
        target_rows,
        source_rows,
        merged_path.display()
    );

    Ok(merged_path)
}

/// Streams every non-blank row of `reader` through `projector` into the
/// shared output. Returns the row count.
fn copy_projected<R, W>(
    reader: R,
    writer: &mut csv::Writer<W>,
    projector: &RowProjector,
) -> Result<usize>
where
    R: std::io::BufRead,
    W: Write,
{
    let mut records = io_utils::record_reader(reader);
    let mut raw = csv::StringRecord::new();
    let mut rows = 0usize;

    while records.read_record(&mut raw)? {
        let fields: Vec<String> = raw.iter().map(str::to_string).collect();
        if io_utils::is_blank_row(&fields) {
            continue;
        }
        io_utils::write_row(writer, &projector.project(&fields))?;
        rows += 1;
    }

    Ok(rows)
}
