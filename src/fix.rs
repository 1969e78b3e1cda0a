//! Deterministic in-place repair of classified rows.
//!
//! The fixer re-splits the raw row and substitutes only the columns
//! implicated by the report; every untouched column is copied
//! byte-for-byte and the column count never changes. The caller re-parses
//! the fixed row and re-classifies it; rows that are still critical after
//! repair are diverted, never silently dropped.

use std::sync::LazyLock;

use regex::Regex;

use crate::{classify::ErrorReport, record::MafRecord, schema::ColumnSchema};

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("digits pattern"));

/// Rewrites the offending fields of one row according to the report.
pub fn fix(
    schema: &ColumnSchema,
    record: &MafRecord,
    fields: &[String],
    report: &ErrorReport,
) -> Vec<String> {
    let cols = schema.well_known();

    let mut ref_allele = record.reference_allele().to_string();
    let mut tum_allele1 = record.tumor_seq_allele1().to_string();
    let mut tum_allele2 = record.tumor_seq_allele2().to_string();
    let mut chromosome = record.chromosome().to_string();

    if report.malformed_ref {
        ref_allele = correct_ref_allele(&ref_allele);
    }

    if report.malformed_tum1 {
        tum_allele1 = correct_tum_allele(&tum_allele1);
    }

    if report.malformed_tum2 {
        tum_allele2 = correct_tum_allele(&tum_allele2);
        // Known upstream annotator quirk: an emptied tumor allele 2 means
        // the alleles were misplaced one slot to the left. Restore the
        // intended roles.
        if tum_allele2.is_empty() && !tum_allele1.is_empty() && !ref_allele.is_empty() {
            tum_allele2 = tum_allele1;
            tum_allele1 = ref_allele.clone();
        }
    }

    if report.long_chr_name {
        chromosome = chromosome
            .strip_prefix("chr")
            .unwrap_or(&chromosome)
            .to_string();
    }

    if report.invalid_chromosome {
        // Common numeric encodings for the sex chromosomes.
        if chromosome == "23" {
            chromosome = "X".to_string();
        } else if chromosome == "24" {
            chromosome = "Y".to_string();
        }
    }

    let mut fixed = Vec::with_capacity(fields.len());

    for (i, part) in fields.iter().enumerate() {
        let value = if report.malformed_allele && cols.reference_allele == Some(i) {
            ref_allele.clone()
        } else if report.malformed_allele && cols.tumor_seq_allele1 == Some(i) {
            tum_allele1.clone()
        } else if report.malformed_allele && cols.tumor_seq_allele2 == Some(i) {
            tum_allele2.clone()
        } else if report.is_invalid_pos() && cols.start_position == Some(i) {
            extract_pos(part)
        } else if report.is_invalid_pos() && cols.end_position == Some(i) {
            extract_pos(part)
        } else if (report.missing_end || report.invalid_length) && cols.end_position == Some(i) {
            match record.start_position() {
                Some(start) => calculate_end_pos(start, &ref_allele).to_string(),
                // without a start position the row is critical anyway
                None => part.clone(),
            }
        } else if (report.long_chr_name || report.invalid_chromosome) && cols.chromosome == Some(i)
        {
            chromosome.clone()
        } else {
            part.clone()
        };

        fixed.push(value);
    }

    fixed
}

/// End position implied by the start position and the reference allele.
///
/// Insertions are adjacent by definition; a purely numeric reference
/// allele is a length code; anything else spans its own length.
pub fn calculate_end_pos(start: i64, ref_allele: &str) -> i64 {
    if ref_allele == "-" {
        start + 1
    } else if DIGITS.is_match(ref_allele) {
        match ref_allele.parse::<i64>() {
            Ok(length) => start + length - 1,
            Err(_) => start + ref_allele.len() as i64 - 1,
        }
    } else {
        start + ref_allele.len() as i64 - 1
    }
}

/// A numeric reference allele cannot be reconstructed without a sequence
/// source, so it is left untouched; such rows stay critical and divert to
/// the misc output.
fn correct_ref_allele(allele: &str) -> String {
    if DIGITS.is_match(allele) {
        allele.to_string()
    } else {
        correct_tum_allele(allele)
    }
}

/// A numeric tumor allele is a length code; it becomes a run of that many
/// `A`s. This is a placeholder, not a sequence lookup. Everything else
/// (`;`-separated ambiguity lists included) becomes the empty placeholder.
fn correct_tum_allele(allele: &str) -> String {
    if DIGITS.is_match(allele) {
        match allele.parse::<usize>() {
            Ok(length) => "A".repeat(length),
            Err(_) => String::new(),
        }
    } else {
        String::new()
    }
}

/// Longest leading digit run of a raw position field; tolerates trailing
/// non-numeric noise from upstream producers.
fn extract_pos(position: &str) -> String {
    position
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect()
}
