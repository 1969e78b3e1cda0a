//! Header reconciliation: canonical output schemas and row re-projection.
//!
//! Given one or more source schemas, reconciliation produces a single
//! canonical, de-duplicated column list assembled from ordered groups:
//!
//! 1. **Standard** MAF columns, fixed canonical order; backfilled as empty
//!    when absent from every source if `add_missing` is set.
//! 2. **Prior-annotation** columns, included only when some source
//!    carries them, never invented.
//! 3. **Functional-impact** columns, likewise never backfilled.
//! 4. **Other** columns: everything else, first-seen order across sources.
//!
//! Named extra columns (e.g. new annotator output) are appended when
//! missing from the union. With `sort` disabled the source order is kept
//! intact and missing standard columns, if requested, are appended at the
//! end instead; the merger relies on this mode.
//!
//! Duplicate names are collapsed case-insensitively; the first occurrence
//! wins, so the canonical schema never contains duplicates for any
//! combination of inputs.

use std::collections::HashSet;

use crate::{
    error::Result,
    schema::ColumnSchema,
};

/// Standard MAF columns in canonical order.
pub const STANDARD_COLUMNS: [&str; 32] = [
    "Hugo_Symbol",
    "Entrez_Gene_Id",
    "Center",
    "NCBI_Build",
    "Chromosome",
    "Start_Position",
    "End_Position",
    "Strand",
    "Variant_Classification",
    "Variant_Type",
    "Reference_Allele",
    "Tumor_Seq_Allele1",
    "Tumor_Seq_Allele2",
    "dbSNP_RS",
    "dbSNP_Val_Status",
    "Tumor_Sample_Barcode",
    "Matched_Norm_Sample_Barcode",
    "Match_Norm_Seq_Allele1",
    "Match_Norm_Seq_Allele2",
    "Tumor_Validation_Allele1",
    "Tumor_Validation_Allele2",
    "Match_Norm_Validation_Allele1",
    "Match_Norm_Validation_Allele2",
    "Verification_Status",
    "Validation_Status",
    "Mutation_Status",
    "Sequencing_Phase",
    "Sequence_Source",
    "Validation_Method",
    "Score",
    "BAM_File",
    "Sequencer",
];

/// Prior-annotation columns (first well-known extension group).
pub const PRIOR_ANNOTATION_COLUMNS: [&str; 5] = [
    "ONCOTATOR_VARIANT_CLASSIFICATION",
    "ONCOTATOR_PROTEIN_CHANGE",
    "ONCOTATOR_COSMIC_OVERLAPPING",
    "ONCOTATOR_DBSNP_RS",
    "ONCOTATOR_GENE_SYMBOL",
];

/// Functional-impact columns (second well-known extension group).
pub const FUNCTIONAL_IMPACT_COLUMNS: [&str; 5] = [
    "MA:FImpact",
    "MA:FIS",
    "MA:link.var",
    "MA:link.MSA",
    "MA:link.PDB",
];

#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    /// Regroup columns into the canonical group order. When false, source
    /// column order is preserved.
    pub sort: bool,
    /// Backfill standard columns absent from every source as empty.
    pub add_missing: bool,
    /// Extension columns appended to the union when missing.
    pub extra_columns: Vec<String>,
    /// Columns omitted from the canonical schema entirely.
    pub excluded_columns: Vec<String>,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            sort: true,
            add_missing: true,
            extra_columns: Vec::new(),
            excluded_columns: Vec::new(),
        }
    }
}

/// One ordered column group with its backfill policy.
struct ColumnGroup<'a> {
    columns: &'a [&'a str],
    backfill_missing: bool,
}

/// Builds the canonical schema for the given source schemas.
pub fn reconcile(schemas: &[&ColumnSchema], options: &ReconcileOptions) -> Result<ColumnSchema> {
    let mut collector = ColumnCollector::new(&options.excluded_columns);

    if options.sort {
        let groups = [
            ColumnGroup {
                columns: &STANDARD_COLUMNS,
                backfill_missing: options.add_missing,
            },
            ColumnGroup {
                columns: &PRIOR_ANNOTATION_COLUMNS,
                backfill_missing: false,
            },
            ColumnGroup {
                columns: &FUNCTIONAL_IMPACT_COLUMNS,
                backfill_missing: false,
            },
        ];

        for group in &groups {
            for &name in group.columns {
                if group.backfill_missing || any_source_has(schemas, name) {
                    collector.push(name);
                }
            }
        }

        // remaining "other" columns, first-seen order across sources
        for schema in schemas {
            for name in schema.names() {
                collector.push(name);
            }
        }
    } else {
        for schema in schemas {
            for name in schema.names() {
                collector.push(name);
            }
        }

        if options.add_missing {
            for name in STANDARD_COLUMNS {
                collector.push(name);
            }
        }
    }

    for name in &options.extra_columns {
        collector.push(name);
    }

    ColumnSchema::from_columns(collector.into_names())
}

fn any_source_has(schemas: &[&ColumnSchema], name: &str) -> bool {
    schemas.iter().any(|s| s.contains_ignore_case(name))
}

/// Order-preserving, case-insensitively de-duplicating name accumulator.
struct ColumnCollector {
    names: Vec<String>,
    seen: HashSet<String>,
    excluded: HashSet<String>,
}

impl ColumnCollector {
    fn new(excluded: &[String]) -> Self {
        Self {
            names: Vec::new(),
            seen: HashSet::new(),
            excluded: excluded.iter().map(|n| n.to_lowercase()).collect(),
        }
    }

    fn push(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        let folded = name.to_lowercase();
        if self.excluded.contains(&folded) || !self.seen.insert(folded) {
            return;
        }
        self.names.push(name.to_string());
    }

    fn into_names(self) -> Vec<String> {
        self.names
    }
}

/// Re-projects rows of one source file onto a canonical schema.
///
/// Built once per source at header-parse time; newly introduced columns
/// read as empty for every row of that source.
#[derive(Debug)]
pub struct RowProjector {
    indices: Vec<Option<usize>>,
}

impl RowProjector {
    pub fn new(canonical: &ColumnSchema, source: &ColumnSchema) -> Self {
        let indices = canonical
            .names()
            .iter()
            .map(|name| source.index_of_ignore_case(name))
            .collect();
        Self { indices }
    }

    /// Projects one source row (already split into fields) onto the
    /// canonical column order. Missing and unmapped fields become empty.
    pub fn project(&self, fields: &[String]) -> Vec<String> {
        self.indices
            .iter()
            .map(|idx| {
                idx.and_then(|i| fields.get(i))
                    .cloned()
                    .unwrap_or_default()
            })
            .collect()
    }
}
