//! Leading-comment and header-line extraction.
//!
//! A MAF file may open with any number of `#`-prefixed metadata lines; the
//! first non-comment line is the tab-separated column header. Extraction
//! leaves the stream positioned at the first data line, so a record reader
//! can be layered directly on top.

use std::io::BufRead;
use std::path::Path;

use crate::error::{MafError, Result};

/// Comments and header line pulled off the front of one input stream.
#[derive(Debug, Clone)]
pub struct MafHeader {
    /// Leading metadata lines, exact text including the `#`, in file order.
    pub comments: Vec<String>,
    /// The header line verbatim.
    pub header_line: String,
}

impl MafHeader {
    /// Number of input lines consumed, header line included.
    pub fn line_count(&self) -> usize {
        self.comments.len() + 1
    }
}

/// Consumes every leading comment line plus the header line.
///
/// Running out of input before a non-comment line is found is fatal: an
/// absent header must never be silently treated as zero columns. A header
/// line with no content at all is equally fatal.
pub fn extract_header<R: BufRead + ?Sized>(reader: &mut R, path: &Path) -> Result<MafHeader> {
    let mut comments = Vec::new();

    loop {
        let mut line = String::new();
        let read = reader
            .read_line(&mut line)
            .map_err(|e| MafError::io(path, e))?;
        if read == 0 {
            return Err(MafError::MissingHeader {
                path: path.to_path_buf(),
            });
        }

        trim_line_ending(&mut line);

        if line.starts_with('#') {
            comments.push(line);
            continue;
        }

        if line.trim().is_empty() {
            return Err(MafError::EmptyHeader {
                path: path.to_path_buf(),
            });
        }

        return Ok(MafHeader {
            comments,
            header_line: line,
        });
    }
}

fn trim_line_ending(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}
