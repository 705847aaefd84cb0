//! CLI integration tests
//!
//! These tests run the built binary against themes laid out in temp
//! directories.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn sanitizer() -> Command {
    Command::cargo_bin("vtex-css-sanitizer").unwrap()
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn theme() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "store/home.jsonc",
        r#"{
  // landing page
  "comp#1": { "props": { "blockClass": "card active" } },
}"#,
    );
    write(
        dir.path(),
        "styles/css/vtex.widget.css",
        ".widgetHandle--card { color: red }\n.widgetHandle--ghost { color: blue }\n",
    );
    dir
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_cli_help() {
    sanitizer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("fix"));
}

#[test]
fn test_cli_version() {
    sanitizer()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vtex-css-sanitizer"));
}

#[test]
fn test_cli_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    sanitizer()
        .args(["analyze", "--no-report"])
        .arg(dir.path().join("nope"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project directory not found"));
}

#[test]
fn test_cli_empty_project_fails() {
    let dir = TempDir::new().unwrap();
    sanitizer()
        .args(["analyze", "--no-report"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No store block files"));
}

// ============================================================================
// Analyze
// ============================================================================

#[test]
fn test_cli_analyze_terminal() {
    let dir = theme();
    sanitizer()
        .args(["analyze", "--no-report"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("--ghost"))
        .stdout(predicate::str::contains("\"active\""))
        .stdout(predicate::str::contains("styles/css/vtex.widget.css"));

    assert!(!dir.path().join(".sanitizer-reports").exists());
}

#[test]
fn test_cli_analyze_json() {
    let dir = theme();
    let output = sanitizer()
        .args(["--quiet", "analyze", "--format", "json", "--no-report"])
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["unused_css"][0]["suffix"], "ghost");
    assert_eq!(
        report["unused_css"][0]["locations"][0]["selector"],
        ".widgetHandle--ghost"
    );
    assert_eq!(report["unused_block_classes"][0]["block_class"], "active");
    assert_eq!(report["unused_block_classes"][0]["locations"][0]["block"], "comp#1");
}

#[test]
fn test_cli_analyze_writes_markdown_report() {
    let dir = theme();
    sanitizer()
        .arg("analyze")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Report saved to"));

    let reports: Vec<_> = fs::read_dir(dir.path().join(".sanitizer-reports"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].starts_with("analysis-report-"));
}

#[test]
fn test_cli_config_file_changes_report_dir() {
    let dir = theme();
    write(dir.path(), ".sanitizer.yml", "report:\n  dir: audit\n");

    sanitizer().arg("analyze").arg(dir.path()).assert().success();

    assert!(dir.path().join("audit").is_dir());
    assert!(!dir.path().join(".sanitizer-reports").exists());
}

// ============================================================================
// Fix
// ============================================================================

#[test]
fn test_cli_fix_dry_run_changes_nothing() {
    let dir = theme();
    let css = dir.path().join("styles/css/vtex.widget.css");
    let before = fs::read_to_string(&css).unwrap();

    sanitizer()
        .args(["fix", "--dry-run", "--no-report"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(".widgetHandle--ghost"))
        .stdout(predicate::str::contains("1 rule(s) would be offered"));

    assert_eq!(fs::read_to_string(&css).unwrap(), before);
}

#[test]
fn test_cli_fix_yes_deletes_orphan_rules() {
    let dir = theme();
    let undo = dir.path().join("undo.sh");

    sanitizer()
        .args(["fix", "--yes"])
        .arg("--undo-script")
        .arg(&undo)
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 rule(s) deleted"));

    assert_eq!(
        fs::read_to_string(dir.path().join("styles/css/vtex.widget.css")).unwrap(),
        ".widgetHandle--card { color: red }\n"
    );
    assert!(fs::read_to_string(&undo).unwrap().contains(".widgetHandle--ghost { color: blue }"));

    let report = fs::read_dir(dir.path().join(".sanitizer-reports"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .find(|name| name.starts_with("fix-report-"));
    assert!(report.is_some());
}

#[test]
fn test_cli_fix_clean_project() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "store/home.json", r#"{"a": {"props": {"blockClass": "card"}}}"#);
    write(dir.path(), "styles/css/vtex.a.css", ".x--card { color: red }\n");

    sanitizer()
        .args(["fix", "--yes", "--no-report"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("already clean"));
}
