//! Error types for MAF processing.
//!
//! Structural defects found in data rows are *not* errors in this sense:
//! they are diagnosed by [`crate::classify`] and repaired or diverted by the
//! sanitizer without aborting the file. The variants here are the fatal,
//! per-file conditions of the format contract.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal per-file conditions surfaced to the caller.
#[derive(Debug, Error)]
pub enum MafError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input ended before a non-comment header line was found.
    #[error("missing header line in '{path}'")]
    MissingHeader { path: PathBuf },

    /// The header line was empty, yielding a schema with no columns.
    #[error("header line defines no columns in '{path}'")]
    EmptyHeader { path: PathBuf },

    /// Two header columns resolve to the same name.
    #[error("duplicate column '{name}' in header")]
    DuplicateColumn { name: String },

    /// Error from the underlying delimited-record reader/writer.
    #[error("record error: {0}")]
    Csv(#[from] csv::Error),
}

impl MafError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type alias for MAF operations.
pub type Result<T> = std::result::Result<T, MafError>;
