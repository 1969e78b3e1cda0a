//! Merge scenarios: union schemas and row re-projection across two files.

mod common;

use common::TestWorkspace;
use maf_toolkit::merge::merge;

fn lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

#[test]
fn union_schema_appends_source_only_columns() {
    let ws = TestWorkspace::new();
    let target = ws.write("target.maf", "A\tB\tC\n1\t2\t3\n4\t5\t6\n");
    let source = ws.write("source.maf", "A\tB\tD\nx\ty\tz\n");

    let merged = merge(&target, &source, None).expect("merge");
    assert_eq!(merged, target.with_extension("maf.merged"));

    let out = ws.read(&merged);
    assert_eq!(
        lines(&out),
        vec![
            "A\tB\tC\tD",
            // target rows keep order and content, D backfilled empty
            "1\t2\t3\t",
            "4\t5\t6\t",
            // source rows re-project onto the same union, C backfilled
            "x\ty\t\tz",
        ]
    );
}

#[test]
fn target_comments_survive_the_merge() {
    let ws = TestWorkspace::new();
    let target = ws.write("target.maf", "#target meta\nA\tB\n1\t2\n");
    let source = ws.write("source.maf", "#source meta\nA\tB\n3\t4\n");
    let output = ws.path().join("merged.maf");

    merge(&target, &source, Some(&output)).expect("merge");

    let out = ws.read(&output);
    assert_eq!(
        lines(&out),
        vec!["#target meta", "A\tB", "1\t2", "3\t4"]
    );
}

#[test]
fn column_matching_is_case_insensitive() {
    let ws = TestWorkspace::new();
    let target = ws.write("target.maf", "Alpha\tBeta\n1\t2\n");
    let source = ws.write("source.maf", "alpha\tGamma\n9\t8\n");
    let output = ws.path().join("merged.maf");

    merge(&target, &source, Some(&output)).expect("merge");

    let out = ws.read(&output);
    // 'alpha' folds into the existing Alpha column instead of duplicating
    assert_eq!(
        lines(&out),
        vec!["Alpha\tBeta\tGamma", "1\t2\t", "9\t\t8"]
    );
}

#[test]
fn blank_lines_are_dropped_from_both_files() {
    let ws = TestWorkspace::new();
    let target = ws.write("target.maf", "A\tB\n\n1\t2\n\n");
    let source = ws.write("source.maf", "A\tB\n\n3\t4\n");
    let output = ws.path().join("merged.maf");

    merge(&target, &source, Some(&output)).expect("merge");
    assert_eq!(
        lines(&ws.read(&output)),
        vec!["A\tB", "1\t2", "3\t4"]
    );
}

#[test]
fn identical_schemas_append_cleanly() {
    let ws = TestWorkspace::new();
    let target = ws.write("target.maf", "A\tB\n1\t2\n");
    let source = ws.write("source.maf", "A\tB\n3\t4\n");
    let output = ws.path().join("merged.maf");

    merge(&target, &source, Some(&output)).expect("merge");
    assert_eq!(
        lines(&ws.read(&output)),
        vec!["A\tB", "1\t2", "3\t4"]
    );
}
