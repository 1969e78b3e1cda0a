//! I/O utilities for MAF reading and writing.
//!
//! All file I/O in maf-toolkit flows through this module. It provides:
//!
//! - **Reader/writer construction**: `open_input`, `open_output`, and the
//!   tab-delimited record reader/writer builders used by every pipeline.
//! - **Byte fidelity**: quoting is disabled on input and output
//!   (`QuoteStyle::Never`), so untouched fields round-trip byte-for-byte.
//! - **Flexible record lengths**: short rows are tolerated; missing trailing
//!   fields read as empty rather than failing the row.
//! - **stdin/stdout**: the `-` path convention routes through standard
//!   streams.
//!
//! Comment lines (`#`-prefixed metadata before the header) are raw text, not
//! records; they are written here directly to the underlying stream before a
//! record writer is layered on top.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Read, Write},
    path::Path,
};

use csv::QuoteStyle;

use crate::error::{MafError, Result};

pub const MAF_DELIMITER: u8 = b'\t';

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if is_dash(path) {
        Ok(Box::new(BufReader::new(std::io::stdin())))
    } else {
        let file = File::open(path).map_err(|e| MafError::io(path, e))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

pub fn open_output(path: &Path) -> Result<Box<dyn Write>> {
    if is_dash(path) {
        Ok(Box::new(std::io::stdout()))
    } else {
        let file = File::create(path).map_err(|e| MafError::io(path, e))?;
        Ok(Box::new(BufWriter::new(file)))
    }
}

/// Wraps the remainder of an input stream (positioned at the first data
/// line) in a tab-delimited record reader.
pub fn record_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(MAF_DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader)
}

pub fn record_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(MAF_DELIMITER)
        .flexible(true)
        .quote_style(QuoteStyle::Never)
        .from_writer(writer)
}

/// Writes leading `#` metadata lines verbatim, in order, to the raw stream.
pub fn write_comment_lines<W: Write>(
    writer: &mut W,
    comments: &[String],
    path: &Path,
) -> Result<()> {
    for comment in comments {
        writeln!(writer, "{comment}").map_err(|e| MafError::io(path, e))?;
    }
    Ok(())
}

pub fn write_row<W: Write>(writer: &mut csv::Writer<W>, fields: &[String]) -> Result<()> {
    writer.write_record(fields.iter())?;
    Ok(())
}

/// A row is blank when it carries no content at all; blank rows are
/// skipped by every pipeline, never counted and never emitted.
pub fn is_blank_row(fields: &[String]) -> bool {
    fields.is_empty() || (fields.len() == 1 && fields[0].trim().is_empty())
}
