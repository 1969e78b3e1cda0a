//! Column schema model: ordered column names with cached lookups.
//!
//! This module owns the [`ColumnSchema`] struct (the canonical
//! representation of one header line) and the [`WellKnownColumns`] index
//! cache resolved once per schema.
//!
//! ## Lookup semantics
//!
//! - `index_of` is an exact, case-sensitive match.
//! - `index_of_ignore_case` lower-cases both sides. Well-known column
//!   resolution always goes through this path, because real-world MAF
//!   producers are inconsistently cased (`Start_Position` vs
//!   `start_position`).
//! - An absent well-known column resolves to `None`, never an error: many
//!   legitimate MAF variants omit optional columns.
//!
//! Duplicate names within one header are rejected at parse time. Empty
//! (unnamed trailing) columns are permitted and are simply not indexable.

use std::collections::HashMap;

use itertools::Itertools;

use crate::error::{MafError, Result};

pub const CHROMOSOME: &str = "Chromosome";
pub const START_POSITION: &str = "Start_Position";
pub const END_POSITION: &str = "End_Position";
pub const REFERENCE_ALLELE: &str = "Reference_Allele";
pub const TUMOR_SEQ_ALLELE_1: &str = "Tumor_Seq_Allele1";
pub const TUMOR_SEQ_ALLELE_2: &str = "Tumor_Seq_Allele2";

/// Indices of the columns the record parser and fixer care about,
/// resolved once per schema.
#[derive(Debug, Clone, Default)]
pub struct WellKnownColumns {
    pub chromosome: Option<usize>,
    pub start_position: Option<usize>,
    pub end_position: Option<usize>,
    pub reference_allele: Option<usize>,
    pub tumor_seq_allele1: Option<usize>,
    pub tumor_seq_allele2: Option<usize>,
}

/// Ordered, indexed set of column names derived from one header line.
#[derive(Debug, Clone)]
pub struct ColumnSchema {
    names: Vec<String>,
    exact: HashMap<String, usize>,
    folded: HashMap<String, usize>,
    well_known: WellKnownColumns,
}

impl ColumnSchema {
    /// Parses a header line, splitting on tab and preserving empty trailing
    /// names.
    pub fn parse(header_line: &str) -> Result<Self> {
        Self::from_columns(header_line.split('\t').map(str::to_string).collect())
    }

    /// Builds a schema from an explicit, ordered name list.
    pub fn from_columns(names: Vec<String>) -> Result<Self> {
        let mut exact = HashMap::with_capacity(names.len());
        let mut folded = HashMap::with_capacity(names.len());

        for (idx, name) in names.iter().enumerate() {
            if name.is_empty() {
                continue;
            }
            if folded.insert(name.to_lowercase(), idx).is_some() {
                return Err(MafError::DuplicateColumn { name: name.clone() });
            }
            exact.insert(name.clone(), idx);
        }

        let well_known = WellKnownColumns {
            chromosome: lookup_folded(&folded, CHROMOSOME),
            start_position: lookup_folded(&folded, START_POSITION),
            end_position: lookup_folded(&folded, END_POSITION),
            reference_allele: lookup_folded(&folded, REFERENCE_ALLELE),
            tumor_seq_allele1: lookup_folded(&folded, TUMOR_SEQ_ALLELE_1),
            tumor_seq_allele2: lookup_folded(&folded, TUMOR_SEQ_ALLELE_2),
        };

        Ok(Self {
            names,
            exact,
            folded,
            well_known,
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Exact, case-sensitive lookup.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.exact.get(name).copied()
    }

    /// Case-insensitive lookup; both sides are lower-cased.
    pub fn index_of_ignore_case(&self, name: &str) -> Option<usize> {
        self.folded.get(&name.to_lowercase()).copied()
    }

    pub fn contains_ignore_case(&self, name: &str) -> bool {
        self.folded.contains_key(&name.to_lowercase())
    }

    pub fn well_known(&self) -> &WellKnownColumns {
        &self.well_known
    }

    /// Renders the schema back into a tab-separated header line.
    pub fn header_line(&self) -> String {
        self.names.iter().join("\t")
    }
}

fn lookup_folded(folded: &HashMap<String, usize>, name: &str) -> Option<usize> {
    folded.get(&name.to_lowercase()).copied()
}
