//! End-to-end sanitization scenarios against real files.

mod common;

use common::{LOCUS_HEADER, TestWorkspace, row};
use maf_toolkit::error::MafError;
use maf_toolkit::reconcile::{ReconcileOptions, STANDARD_COLUMNS};
use maf_toolkit::sanitize::{misc_filename, sanitize};

/// Options that keep the source header untouched, so row-level assertions
/// stay readable.
fn plain_options() -> ReconcileOptions {
    ReconcileOptions {
        sort: false,
        add_missing: false,
        ..ReconcileOptions::default()
    }
}

fn lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

#[test]
fn fixes_length_coded_allele_and_chr_prefix() {
    let ws = TestWorkspace::new();
    let input = ws.write(
        "in.maf",
        &format!("{LOCUS_HEADER}\n{}\n", row(&["chr7", "100", "100", "A", "A", "3"])),
    );
    let output = ws.path().join("out.maf");

    let errors = sanitize(&input, Some(&output), None, &plain_options()).expect("sanitize");
    assert_eq!(errors, 1);

    let out = ws.read(&output);
    assert_eq!(
        lines(&out),
        vec![LOCUS_HEADER, "7\t100\t100\tA\tA\tAAA"]
    );

    // the misc side file carries the identical header and nothing else
    let misc = ws.read(&misc_filename(&output));
    assert_eq!(lines(&misc), vec![LOCUS_HEADER]);
}

#[test]
fn diverts_critical_rows_to_misc_unchanged() {
    let ws = TestWorkspace::new();
    let good = row(&["7", "100", "100", "A", "A", "C"]);
    let bad = row(&["7", "100", "102", "3", "A", "C"]);
    let input = ws.write("in.maf", &format!("{LOCUS_HEADER}\n{good}\n{bad}\n"));
    let output = ws.path().join("out.maf");

    let errors = sanitize(&input, Some(&output), None, &plain_options()).expect("sanitize");
    assert_eq!(errors, 1);

    let out = ws.read(&output);
    assert_eq!(lines(&out), vec![LOCUS_HEADER, good.as_str()]);

    // the unfixable row lands in misc in its original, unfixed form
    let misc = ws.read(&misc_filename(&output));
    assert_eq!(lines(&misc), vec![LOCUS_HEADER, bad.as_str()]);
}

#[test]
fn recomputes_missing_end_position() {
    let ws = TestWorkspace::new();
    let input = ws.write(
        "in.maf",
        &format!("{LOCUS_HEADER}\n{}\n", row(&["7", "100", "", "ACG", "ACG", "T"])),
    );
    let output = ws.path().join("out.maf");

    let errors = sanitize(&input, Some(&output), None, &plain_options()).expect("sanitize");
    assert_eq!(errors, 1);
    assert_eq!(
        lines(&ws.read(&output))[1],
        "7\t100\t102\tACG\tACG\tT"
    );
}

#[test]
fn insertion_gets_adjacent_end_position() {
    let ws = TestWorkspace::new();
    let input = ws.write(
        "in.maf",
        &format!("{LOCUS_HEADER}\n{}\n", row(&["7", "100", "", "-", "A", "A"])),
    );
    let output = ws.path().join("out.maf");

    sanitize(&input, Some(&output), None, &plain_options()).expect("sanitize");
    assert_eq!(lines(&ws.read(&output))[1], "7\t100\t101\t-\tA\tA");
}

#[test]
fn comments_pass_through_and_blank_lines_vanish() {
    let ws = TestWorkspace::new();
    let good = row(&["7", "100", "100", "A", "A", "C"]);
    let input = ws.write(
        "in.maf",
        &format!("#version 2.4\n#center mskcc\n{LOCUS_HEADER}\n\n{good}\n\n"),
    );
    let output = ws.path().join("out.maf");

    let errors = sanitize(&input, Some(&output), None, &plain_options()).expect("sanitize");
    assert_eq!(errors, 0);

    let out = ws.read(&output);
    assert_eq!(
        lines(&out),
        vec!["#version 2.4", "#center mskcc", LOCUS_HEADER, good.as_str()]
    );

    // comments belong to the primary output only
    assert_eq!(lines(&ws.read(&misc_filename(&output))), vec![LOCUS_HEADER]);
}

#[test]
fn chromosome_normalization_end_to_end() {
    let ws = TestWorkspace::new();
    let rows = [
        row(&["23", "100", "100", "A", "A", "C"]),
        row(&["24", "100", "100", "A", "A", "C"]),
        row(&["MT", "100", "100", "A", "A", "C"]),
        row(&["chrZ", "100", "100", "A", "A", "C"]),
    ];
    let input = ws.write(
        "in.maf",
        &format!("{LOCUS_HEADER}\n{}\n", rows.join("\n")),
    );
    let output = ws.path().join("out.maf");

    let errors = sanitize(&input, Some(&output), None, &plain_options()).expect("sanitize");
    assert_eq!(errors, 4);

    // 23/24 map onto the sex chromosomes and survive
    let out = ws.read(&output);
    assert_eq!(
        lines(&out),
        vec![
            LOCUS_HEADER,
            "X\t100\t100\tA\tA\tC",
            "Y\t100\t100\tA\tA\tC"
        ]
    );

    // no mapping rule covers MT or chrZ; both divert unchanged
    let misc = ws.read(&misc_filename(&output));
    assert_eq!(
        lines(&misc),
        vec![LOCUS_HEADER, rows[2].as_str(), rows[3].as_str()]
    );
}

#[test]
fn missing_header_is_fatal() {
    let ws = TestWorkspace::new();

    let empty = ws.write("empty.maf", "");
    let err = sanitize(&empty, None, None, &plain_options()).unwrap_err();
    assert!(matches!(err, MafError::MissingHeader { .. }));

    let only_comments = ws.write("comments.maf", "#a\n#b\n");
    let err = sanitize(&only_comments, None, None, &plain_options()).unwrap_err();
    assert!(matches!(err, MafError::MissingHeader { .. }));

    let blank_header = ws.write("blank.maf", "\n7\t100\n");
    let err = sanitize(&blank_header, None, None, &plain_options()).unwrap_err();
    assert!(matches!(err, MafError::EmptyHeader { .. }));
}

#[test]
fn validation_only_mode_counts_without_writing() {
    let ws = TestWorkspace::new();
    let input = ws.write(
        "in.maf",
        &format!(
            "{LOCUS_HEADER}\n{}\n{}\n",
            row(&["chr7", "100", "100", "A", "A", "C"]),
            row(&["7", "100", "100", "A", "A", "C"])
        ),
    );

    let errors = sanitize(&input, None, None, &plain_options()).expect("validate");
    assert_eq!(errors, 1);
}

#[test]
fn default_options_project_onto_canonical_header() {
    let ws = TestWorkspace::new();
    let input = ws.write(
        "in.maf",
        &format!(
            "{LOCUS_HEADER}\tcustom_x\n{}\n",
            row(&["7", "100", "100", "A", "A", "C", "extra"])
        ),
    );
    let output = ws.path().join("out.maf");

    sanitize(&input, Some(&output), None, &ReconcileOptions::default()).expect("sanitize");

    let out = ws.read(&output);
    let out_lines = lines(&out);
    let header: Vec<&str> = out_lines[0].split('\t').collect();
    assert_eq!(header.len(), STANDARD_COLUMNS.len() + 1);
    assert_eq!(&header[..STANDARD_COLUMNS.len()], &STANDARD_COLUMNS[..]);
    assert_eq!(header[STANDARD_COLUMNS.len()], "custom_x");

    let fields: Vec<&str> = out_lines[1].split('\t').collect();
    assert_eq!(fields.len(), header.len());
    assert_eq!(fields[0], ""); // Hugo_Symbol backfilled empty
    assert_eq!(fields[4], "7"); // Chromosome
    assert_eq!(fields[5], "100"); // Start_Position
    assert_eq!(fields[10], "A"); // Reference_Allele
    assert_eq!(fields[STANDARD_COLUMNS.len()], "extra");
}

#[test]
fn explicit_misc_path_is_honored() {
    let ws = TestWorkspace::new();
    let bad = row(&["7", "", "100", "A", "A", "C"]);
    let input = ws.write("in.maf", &format!("{LOCUS_HEADER}\n{bad}\n"));
    let output = ws.path().join("out.maf");
    let misc = ws.path().join("side.maf");

    sanitize(&input, Some(&output), Some(&misc), &plain_options()).expect("sanitize");
    assert_eq!(lines(&ws.read(&misc)), vec![LOCUS_HEADER, bad.as_str()]);
}

#[test]
fn short_rows_are_padded_by_projection() {
    let ws = TestWorkspace::new();
    let input = ws.write(
        "in.maf",
        &format!("{LOCUS_HEADER}\n{}\n", row(&["7", "100", "100", "A", "A"])),
    );
    let output = ws.path().join("out.maf");

    let errors = sanitize(&input, Some(&output), None, &plain_options()).expect("sanitize");
    // the absent tumor allele 2 reads as empty, which is malformed but not
    // critical while tumor allele 1 is intact
    assert_eq!(errors, 1);
    assert_eq!(lines(&ws.read(&output))[1], "7\t100\t100\tA\tA\t");
}

#[test]
fn misc_filename_inserts_suffix_before_extension() {
    use std::path::Path;
    assert_eq!(
        misc_filename(Path::new("out.maf")),
        Path::new("out_misc.maf")
    );
    assert_eq!(
        misc_filename(Path::new("dir/out.maf")),
        Path::new("dir/out_misc.maf")
    );
    assert_eq!(misc_filename(Path::new("out")), Path::new("out_misc"));
}
