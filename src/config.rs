//! Options document loading.
//!
//! The core never reads configuration sources itself; it receives plain
//! [`ReconcileOptions`] parameters. This module is the CLI-side loader for
//! a YAML options document covering the same knobs, plus batch settings.

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::reconcile::ReconcileOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Options {
    /// Regroup output columns into canonical order.
    pub sort_columns: bool,
    /// Backfill absent standard columns as empty.
    pub add_missing_columns: bool,
    /// Columns omitted from the output schema.
    pub excluded_columns: Vec<String>,
    /// Extension columns appended to the output schema when missing.
    pub extra_columns: Vec<String>,
    /// Worker count for batch runs; defaults to the machine's CPU count.
    pub jobs: Option<usize>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            sort_columns: true,
            add_missing_columns: true,
            excluded_columns: Vec::new(),
            extra_columns: Vec::new(),
            jobs: None,
        }
    }
}

impl Options {
    pub fn load(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Opening options file {path:?}"))?;
        let options: Options = serde_yaml::from_reader(BufReader::new(file))
            .with_context(|| format!("Parsing options file {path:?}"))?;
        Ok(options)
    }

    pub fn reconcile_options(&self) -> ReconcileOptions {
        ReconcileOptions {
            sort: self.sort_columns,
            add_missing: self.add_missing_columns,
            extra_columns: self.extra_columns.clone(),
            excluded_columns: self.excluded_columns.clone(),
        }
    }
}
