//! Integration tests for the analysis pipeline
//!
//! Each test lays out a small store theme in a temp directory and runs
//! discovery plus the two-way comparison against it.

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use vtex_css_sanitizer::analysis::Analysis;
use vtex_css_sanitizer::config::Config;
use vtex_css_sanitizer::discovery::FileFinder;
use vtex_css_sanitizer::error::SanitizerError;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn analyze(root: &Path) -> Analysis {
    let config = Config::default();
    let files = FileFinder::new(&config).find(root).unwrap();
    Analysis::run(&files).unwrap()
}

fn set(items: impl IntoIterator<Item = impl AsRef<str>>) -> Vec<String> {
    items.into_iter().map(|s| s.as_ref().to_string()).collect()
}

#[test]
fn test_two_way_orphans() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "store/home.json",
        r#"{"comp#1": {"props": {"blockClass": "card active"}}}"#,
    );
    write(
        dir.path(),
        "styles/css/vtex.widget.css",
        ".widgetHandle--card { color: red } .widgetHandle--ghost { color: blue }",
    );

    let analysis = analyze(dir.path());

    assert_eq!(set(analysis.orphan_suffixes()), ["ghost"]);
    assert_eq!(set(analysis.orphan_declarations()), ["active"]);
    assert_eq!(analysis.stats.json_files, 1);
    assert_eq!(analysis.stats.css_files, 1);
}

#[test]
fn test_orphans_never_overlap_declarations() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "store/blocks/header.jsonc",
        r#"{
  // header row
  "flex-layout.row#header": { "props": { "blockClass": ["header", "sticky"] } },
  "rich-text#promo": { "props": { "blockClass": "promo" } },
}"#,
    );
    write(
        dir.path(),
        "styles/css/vtex.flex-layout.css",
        r#"
.flexRow--header .flexRowContent--sticky { position: sticky; }
.flexRow--footer { padding: 0; }
@media (min-width: 40em) {
  .flexRowContent--legacy--isActive { display: none; }
}
"#,
    );
    write(
        dir.path(),
        "styles/css/vtex.rich-text.css",
        ".paragraph--promo { font-weight: bold; }",
    );

    let analysis = analyze(dir.path());

    for suffix in analysis.orphan_suffixes() {
        assert!(!analysis.declarations.contains_key(suffix));
    }
    assert_eq!(set(analysis.orphan_suffixes()), ["footer", "legacy"]);
    assert!(analysis.orphan_declarations().is_empty());
}

#[test]
fn test_analysis_is_idempotent() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "store/home.json",
        r#"{"a": {"props": {"blockClass": "one two"}}, "b": {"props": {"blockClass": "three"}}}"#,
    );
    write(dir.path(), "styles/css/vtex.a.css", ".x--one { } .x--four { }");
    write(dir.path(), "styles/css/vtex.b.css", ".y--two, .y--five { }");

    let first = analyze(dir.path());
    let second = analyze(dir.path());

    assert_eq!(first.comparison, second.comparison);
    assert_eq!(
        first.suffixes.locations("four"),
        second.suffixes.locations("four")
    );
}

#[test]
fn test_custom_stylesheets_are_ignored() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "store/home.json", r#"{"a": {"props": {"blockClass": "one"}}}"#);
    write(dir.path(), "styles/css/vtex.a.css", ".x--one { }");
    write(dir.path(), "styles/css/custom.css", ".x--orphan { }");

    let analysis = analyze(dir.path());

    assert!(analysis.orphan_suffixes().is_empty());
    assert_eq!(analysis.stats.css_files, 1);
}

#[test]
fn test_broken_files_are_skipped() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "store/home.json", r#"{"a": {"props": {"blockClass": "one"}}}"#);
    write(dir.path(), "store/broken.json", r#"{"a": "#);
    write(dir.path(), "styles/css/vtex.a.css", ".x--one { }");

    let analysis = analyze(dir.path());

    assert_eq!(analysis.skipped.len(), 1);
    assert!(analysis.skipped[0].path.ends_with("store/broken.json"));
    assert!(analysis.comparison.is_clean());
}

#[test]
fn test_missing_stylesheets_is_an_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "store/home.json", r#"{}"#);

    let config = Config::default();
    let files = FileFinder::new(&config).find(dir.path()).unwrap();
    let result = Analysis::run(&files);

    assert!(matches!(result, Err(SanitizerError::NoInputFiles { .. })));
}

#[test]
fn test_missing_block_files_is_an_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "styles/css/vtex.a.css", ".x--one { }");

    let config = Config::default();
    let files = FileFinder::new(&config).find(dir.path()).unwrap();

    assert!(matches!(
        Analysis::run(&files),
        Err(SanitizerError::NoInputFiles { .. })
    ));
}
