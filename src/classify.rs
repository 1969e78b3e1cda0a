//! Structural-defect classification for one parsed row.
//!
//! Each diagnostic is computed independently from exactly one
//! [`MafRecord`]; the report is a plain value that is recomputed after any
//! fix, never mutated.

use std::sync::LazyLock;

use regex::Regex;

use crate::record::MafRecord;

static VALID_ALLELE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[TCGAtcga]+$").expect("allele pattern"));

static VALID_CHROMOSOME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[1-9]|1[0-9]|2[0-2]|[XxYy])$").expect("chromosome pattern"));

/// Structural diagnostics for one row.
///
/// `non_adjacent_ins` is a known quirk carried over from the original
/// checker: it is true for insertions whose start and end positions are
/// *equal*, i.e. it flags the adjacent case despite its name. Nothing
/// drives a fix off this flag; it is informational only and preserved
/// as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorReport {
    /// 1-based input line number, when known.
    pub line_number: Option<usize>,
    pub malformed_allele: bool,
    pub malformed_ref: bool,
    pub malformed_tum1: bool,
    pub malformed_tum2: bool,
    pub missing_start: bool,
    pub missing_end: bool,
    pub invalid_chromosome: bool,
    pub long_chr_name: bool,
    pub non_adjacent_ins: bool,
    pub invalid_length: bool,
}

impl ErrorReport {
    pub fn contains_error(&self) -> bool {
        self.malformed_allele
            || self.invalid_chromosome
            || self.long_chr_name
            || self.missing_start
            || self.missing_end
            || self.non_adjacent_ins
            || self.invalid_length
    }

    /// A critical row cannot be safely repaired and must be diverted.
    pub fn has_critical_error(&self) -> bool {
        self.malformed_ref
            || (self.malformed_tum1 && self.malformed_tum2)
            || self.invalid_chromosome
            || self.missing_start
    }

    /// Both positions unusable; the fixer then salvages digit prefixes from
    /// the raw fields instead of recomputing.
    pub fn is_invalid_pos(&self) -> bool {
        self.missing_start && self.missing_end
    }
}

pub fn classify(record: &MafRecord) -> ErrorReport {
    classify_at(record, None)
}

pub fn classify_at(record: &MafRecord, line_number: Option<usize>) -> ErrorReport {
    let mut report = ErrorReport {
        line_number,
        ..ErrorReport::default()
    };

    if !is_valid_allele(record.reference_allele()) {
        report.malformed_allele = true;
        report.malformed_ref = true;
    }

    if !is_valid_allele(record.tumor_seq_allele1()) {
        report.malformed_allele = true;
        report.malformed_tum1 = true;
    }

    if !is_valid_allele(record.tumor_seq_allele2()) {
        report.malformed_allele = true;
        report.malformed_tum2 = true;
    }

    report.missing_start = record.start_position().is_none();
    report.missing_end = record.end_position().is_none();

    let stripped = record
        .chromosome()
        .strip_prefix("chr")
        .unwrap_or(record.chromosome());
    report.invalid_chromosome = !VALID_CHROMOSOME.is_match(stripped);
    report.long_chr_name = record.chromosome().starts_with("chr");

    report.non_adjacent_ins = verify_ins_adjacency(record);

    report.invalid_length = false;
    if !report.missing_start && !report.missing_end {
        report.invalid_length = !is_valid_length(record);
    }

    report
}

/// An allele is valid iff it is one or more of A/C/G/T (either case) or the
/// single `-` indel marker. Length codes, `;`-separated ambiguity lists,
/// and empty strings are all malformed.
pub fn is_valid_allele(allele: &str) -> bool {
    VALID_ALLELE.is_match(allele) || allele == "-"
}

/// Reference allele length must match the declared coordinate span.
/// Insertions (`-`) skip the check.
fn is_valid_length(record: &MafRecord) -> bool {
    let (Some(start), Some(end)) = (record.start_position(), record.end_position()) else {
        return false;
    };

    record.reference_allele() == "-"
        || record.reference_allele().len() as i64 - 1 == end - start
}

fn verify_ins_adjacency(record: &MafRecord) -> bool {
    record.reference_allele() == "-"
        && record.start_position().is_some()
        && record.end_position().is_some()
        && record.start_position() == record.end_position()
}
