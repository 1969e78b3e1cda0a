//! Typed view over one MAF data row.

use crate::schema::ColumnSchema;

/// One parsed data row. Immutable once parsed; after a fix rewrites any
/// field, the row is re-parsed rather than the record mutated, so the
/// classifier never sees stale state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MafRecord {
    chromosome: String,
    start_position: Option<i64>,
    end_position: Option<i64>,
    reference_allele: String,
    tumor_seq_allele1: String,
    tumor_seq_allele2: String,
}

impl MafRecord {
    /// Parses a row already split into fields. Fields the schema does not
    /// map resolve to empty strings; positions that are absent or fail to
    /// parse as integers resolve to `None`.
    pub fn parse(fields: &[String], schema: &ColumnSchema) -> Self {
        let cols = schema.well_known();
        Self {
            chromosome: field(fields, cols.chromosome).to_string(),
            start_position: position(fields, cols.start_position),
            end_position: position(fields, cols.end_position),
            reference_allele: field(fields, cols.reference_allele).to_string(),
            tumor_seq_allele1: field(fields, cols.tumor_seq_allele1).to_string(),
            tumor_seq_allele2: field(fields, cols.tumor_seq_allele2).to_string(),
        }
    }

    /// Parses a raw line, splitting on tab with trailing empty fields
    /// preserved. Fix operations may write an empty string into a trailing
    /// column; a truncating split would lose it.
    pub fn parse_line(line: &str, schema: &ColumnSchema) -> Self {
        let fields = split_line(line);
        Self::parse(&fields, schema)
    }

    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    pub fn start_position(&self) -> Option<i64> {
        self.start_position
    }

    pub fn end_position(&self) -> Option<i64> {
        self.end_position
    }

    pub fn reference_allele(&self) -> &str {
        &self.reference_allele
    }

    pub fn tumor_seq_allele1(&self) -> &str {
        &self.tumor_seq_allele1
    }

    pub fn tumor_seq_allele2(&self) -> &str {
        &self.tumor_seq_allele2
    }
}

/// Tab split preserving trailing empty fields.
pub fn split_line(line: &str) -> Vec<String> {
    line.split('\t').map(str::to_string).collect()
}

fn field(fields: &[String], index: Option<usize>) -> &str {
    index
        .and_then(|i| fields.get(i))
        .map(String::as_str)
        .unwrap_or("")
}

fn position(fields: &[String], index: Option<usize>) -> Option<i64> {
    field(fields, index).parse().ok()
}
