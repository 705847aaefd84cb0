//! Integration tests for the interactive fix flow
//!
//! The prompt is replaced by a scripted one so runs are deterministic.

use miette::Result;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use vtex_css_sanitizer::analysis::Analysis;
use vtex_css_sanitizer::config::{Config, ReportConfig};
use vtex_css_sanitizer::discovery::{FileFinder, ProjectFiles};
use vtex_css_sanitizer::refactor::{
    AcceptAll, CandidateView, Decision, FixEngine, FixPrompt, FixStatus,
};
use vtex_css_sanitizer::report::ReportWriter;

struct Scripted {
    answers: VecDeque<Decision>,
    asked: Vec<String>,
}

impl Scripted {
    fn new(answers: &[Decision]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            asked: Vec::new(),
        }
    }
}

impl FixPrompt for Scripted {
    fn decide(&mut self, candidate: &CandidateView<'_>) -> Result<Decision> {
        self.asked.push(candidate.selectors.join(", "));
        Ok(self.answers.pop_front().expect("prompt asked more often than scripted"))
    }
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

const SHEET_A: &str = ".a--ghost { color: blue; }\n.a--card { color: red; }\n.a--stale { margin: 0; }\n";
const SHEET_B: &str = ".b--old { color: green; }\n\n.b--unused, .b--gone { color: gray; }\n";
const SHEET_C: &str = ".c--phantom { display: none; }\n";

/// Theme with one declared class and orphan rules spread over three files
fn theme() -> (TempDir, ProjectFiles, Analysis) {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "store/home.json", r#"{"a": {"props": {"blockClass": "card"}}}"#);
    write(dir.path(), "styles/css/vtex.a.css", SHEET_A);
    write(dir.path(), "styles/css/vtex.b.css", SHEET_B);
    write(dir.path(), "styles/css/vtex.c.css", SHEET_C);

    let config = Config::default();
    let files = FileFinder::new(&config).find(dir.path()).unwrap();
    let analysis = Analysis::run(&files).unwrap();
    (dir, files, analysis)
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

#[test]
fn test_cancellation_keeps_partial_progress() {
    let (dir, files, analysis) = theme();

    let mut prompt = Scripted::new(&[
        Decision::Accept,
        Decision::Decline,
        Decision::Accept,
        Decision::Abort,
    ]);
    let outcome = FixEngine::new()
        .run(&files.stylesheets, analysis.orphan_suffixes(), &mut prompt)
        .unwrap();

    assert_eq!(outcome.status, FixStatus::Cancelled);
    assert_eq!(outcome.deleted.len(), 2);
    assert_eq!(outcome.kept.len(), 1);
    assert_eq!(outcome.deleted[0].rule, ".a--ghost { color: blue; }");
    assert_eq!(outcome.kept[0].rule, ".a--stale { margin: 0; }");
    assert_eq!(outcome.deleted[1].rule, ".b--old { color: green; }");
    assert_eq!(prompt.asked, [".a--ghost", ".a--stale", ".b--old", ".b--unused, .b--gone"]);

    assert_eq!(
        read(dir.path(), "styles/css/vtex.a.css"),
        ".a--card { color: red; }\n.a--stale { margin: 0; }\n"
    );
    assert_eq!(
        read(dir.path(), "styles/css/vtex.b.css"),
        ".b--unused, .b--gone { color: gray; }\n"
    );
    assert_eq!(read(dir.path(), "styles/css/vtex.c.css"), SHEET_C);

    let report = ReportWriter::new(dir.path(), &ReportConfig::default())
        .write_fix(&outcome)
        .unwrap();
    let contents = fs::read_to_string(report).unwrap();
    assert!(contents.contains("## Deleted rules (2)"));
    assert!(contents.contains("## Kept rules (1)"));
    assert!(!contents.contains(".c--phantom"));
}

#[test]
fn test_accept_all_cleans_every_file() {
    let (dir, files, analysis) = theme();

    let outcome = FixEngine::new()
        .with_undo_script(true)
        .run(&files.stylesheets, analysis.orphan_suffixes(), &mut AcceptAll)
        .unwrap();

    assert_eq!(outcome.status, FixStatus::Completed);
    assert_eq!(outcome.deleted.len(), 5);
    assert_eq!(outcome.files_modified.len(), 3);
    assert_eq!(read(dir.path(), "styles/css/vtex.a.css"), ".a--card { color: red; }\n");
    assert_eq!(read(dir.path(), "styles/css/vtex.b.css"), "\n");
    assert_eq!(read(dir.path(), "styles/css/vtex.c.css"), "\n");

    // A second pass finds nothing left to remove
    let files = FileFinder::new(&Config::default()).find(dir.path()).unwrap();
    let rerun = Analysis::run(&files).unwrap();
    assert!(rerun.orphan_suffixes().is_empty());

    let undo = outcome.undo_script.unwrap();
    assert_eq!(undo.file_count(), 3);
    assert!(undo.render().contains(SHEET_B));
}

#[test]
fn test_mixed_rules_are_never_offered() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "store/home.json", r#"{"a": {"props": {"blockClass": "card"}}}"#);
    let sheet = ".x--ghost, .x--card { color: red; }\n.x--ghost--isActive { color: blue; }\n";
    write(dir.path(), "styles/css/vtex.x.css", sheet);

    let files = FileFinder::new(&Config::default()).find(dir.path()).unwrap();
    let analysis = Analysis::run(&files).unwrap();

    let mut prompt = Scripted::new(&[Decision::Accept]);
    let outcome = FixEngine::new()
        .run(&files.stylesheets, analysis.orphan_suffixes(), &mut prompt)
        .unwrap();

    assert_eq!(prompt.asked, [".x--ghost--isActive"]);
    assert_eq!(outcome.deleted.len(), 1);
    assert_eq!(
        read(dir.path(), "styles/css/vtex.x.css"),
        ".x--ghost, .x--card { color: red; }\n"
    );
}

#[test]
fn test_clean_project_short_circuits() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "store/home.json", r#"{"a": {"props": {"blockClass": "card"}}}"#);
    write(dir.path(), "styles/css/vtex.x.css", ".x--card { color: red; }\n");

    let files = FileFinder::new(&Config::default()).find(dir.path()).unwrap();
    let analysis = Analysis::run(&files).unwrap();

    let mut prompt = Scripted::new(&[]);
    let outcome = FixEngine::new()
        .run(&files.stylesheets, analysis.orphan_suffixes(), &mut prompt)
        .unwrap();

    assert_eq!(outcome.status, FixStatus::NothingToFix);
    assert!(!outcome.has_entries());
    assert!(outcome.files_modified.is_empty());
}

#[test]
fn test_modern_and_legacy_syntax_is_cleaned() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "store/home.json", r#"{"a": {"props": {"blockClass": "card"}}}"#);
    let sheet = concat!(
        ".m--card { color: red; }\n",
        "@media (width >= 600px) {\n  .m--ghost { color: blue; }\n}\n",
        ".m--stale { filter: progid:DXImageTransform.Microsoft.gradient(enabled=false); }\n",
    );
    write(dir.path(), "styles/css/vtex.m.css", sheet);

    let files = FileFinder::new(&Config::default()).find(dir.path()).unwrap();
    let analysis = Analysis::run(&files).unwrap();
    assert!(analysis.skipped.is_empty());

    let outcome = FixEngine::new()
        .run(&files.stylesheets, analysis.orphan_suffixes(), &mut AcceptAll)
        .unwrap();

    assert_eq!(outcome.deleted.len(), 2);
    assert_eq!(
        read(dir.path(), "styles/css/vtex.m.css"),
        ".m--card { color: red; }\n@media (width >= 600px) {\n}\n"
    );
}
