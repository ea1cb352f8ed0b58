//! Integration tests for the rubric tally
//!
//! Runs the loader and the tally over the dummy labs in tests/fixtures, in
//! both document formats.

use labzen::models::{Category, SummaryKey};
use labzen::{load_blocks, tally, LoadError, TallyError};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn test_summary_dimensions_match_for_both_formats() {
    for name in ["dummylab.ipynb", "dummylab.Rmd"] {
        let blocks = load_blocks(&fixture(name)).unwrap();

        let (_, summary) = tally(&blocks, false).unwrap();
        assert_eq!(summary.len(), 2, "{} without margins", name);

        let (_, summary) = tally(&blocks, true).unwrap();
        assert_eq!(summary.len(), 3, "{} with margins", name);
    }
}

#[test]
fn test_notebook_detail_table() {
    let blocks = load_blocks(&fixture("dummylab.ipynb")).unwrap();
    let (detail, summary) = tally(&blocks, true).unwrap();

    let headers: Vec<&str> = detail.iter().map(|e| e.header.as_str()).collect();
    assert_eq!(headers, ["Exercise 1", "Exercise 2", "(Optional) Exercise 3"]);

    let blocks_of: Vec<usize> = detail.iter().map(|e| e.block).collect();
    assert_eq!(blocks_of, [2, 3, 4]);

    assert_eq!(detail.entries[1].criteria, ["viz", "mechanics"]);
    assert_eq!(detail.entries[1].points, [4, 1]);
    assert_eq!(detail.entries[2].category, Category::Optional);

    let required = summary
        .row(SummaryKey::Category(Category::NonOptional))
        .unwrap();
    let optional = summary.row(SummaryKey::Category(Category::Optional)).unwrap();
    assert_eq!(required.total, 10);
    assert_eq!(optional.total, 2);
    assert_eq!(summary.margin().unwrap().total, 12);
    assert!((required.proportion - 0.95).abs() < 1e-9);
    assert!((optional.proportion - 0.19).abs() < 1e-9);
}

#[test]
fn test_rmd_ignores_code_chunks() {
    let blocks = load_blocks(&fixture("dummylab.Rmd")).unwrap();
    let (detail, summary) = tally(&blocks, false).unwrap();

    assert_eq!(detail.len(), 3);
    assert!(detail.iter().all(|e| !e.criteria.contains(&"fake".to_string())));
    assert_eq!(detail.total(), summary.category_total());
    assert_eq!(detail.entries[2].header, "BONUS: Exercise 3");
    assert_eq!(detail.entries[2].category, Category::Optional);
}

#[test]
fn test_rubric_under_prose_aborts_whole_document() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.Rmd");
    std::fs::write(
        &path,
        "## Exercise 1\nrubric={accuracy:3}\n\n## Exercise 2\nSome instructions first.\nrubric={accuracy:2}\n",
    )
    .unwrap();

    let blocks = load_blocks(&path).unwrap();
    match tally(&blocks, true) {
        Err(TallyError::Structure { text, .. }) => assert_eq!(text, "rubric={accuracy:2}"),
        other => panic!("expected structure error, got {:?}", other),
    }
}

#[test]
fn test_unsupported_extension() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("lab.md");
    std::fs::write(&path, "# Lab\nrubric={a:1}").unwrap();
    assert!(matches!(load_blocks(&path), Err(LoadError::UnsupportedFormat(_))));
}
