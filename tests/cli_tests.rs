//! CLI integration tests - drive the sheetgraph binary end to end with
//! assert_cmd. Import tests point at an unreachable endpoint; nothing
//! here needs a running database.

use assert_cmd::Command;
use predicates::prelude::*;
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn sales_fixture(dir: &Path) -> PathBuf {
    let path = dir.join("sales.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Region").unwrap();
    sheet.write_string(0, 1, "City").unwrap();
    sheet.write_string(0, 2, "Sales").unwrap();
    sheet.write_string(1, 0, "West").unwrap();
    sheet.write_string(1, 1, "Seattle").unwrap();
    sheet.write_number(1, 2, 100.0).unwrap();
    workbook.save(&path).unwrap();
    path
}

fn sheetgraph() -> Command {
    Command::cargo_bin("sheetgraph").unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════
// HELP AND VERSION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn cli_help() {
    sheetgraph()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sheetgraph"))
        .stdout(predicate::str::contains("COMMANDS"));
}

#[test]
fn cli_version() {
    sheetgraph()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sheetgraph"));
}

#[test]
fn preview_help() {
    sheetgraph()
        .args(["preview", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--blank-run-threshold"))
        .stdout(predicate::str::contains("--data-start-row"));
}

#[test]
fn import_help() {
    sheetgraph()
        .args(["import", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--uri"))
        .stdout(predicate::str::contains("--row-transactions"))
        .stdout(predicate::str::contains("--skip-write-errors"));
}

// ═══════════════════════════════════════════════════════════════════════════
// PREVIEW
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn preview_renders_headers_and_summary() {
    let dir = TempDir::new().unwrap();
    let path = sales_fixture(dir.path());

    sheetgraph()
        .arg("preview")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("REGION"))
        .stdout(predicate::str::contains("CITY"))
        .stdout(predicate::str::contains("SALES"))
        .stdout(predicate::str::contains("Preview complete"));
}

#[test]
fn preview_verbose_shows_nodes_and_properties() {
    let dir = TempDir::new().unwrap();
    let path = sales_fixture(dir.path());

    sheetgraph()
        .args(["preview", "--verbose"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("West"))
        .stdout(predicate::str::contains("Seattle"))
        .stdout(predicate::str::contains("Sales = 100"));
}

#[test]
fn preview_json_is_parseable() {
    let dir = TempDir::new().unwrap();
    let path = sales_fixture(dir.path());

    let output = sheetgraph()
        .args(["preview", "--json"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let preview: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(preview["headers"][0], "REGION");
    assert_eq!(preview["rows"][0]["row"], 2);
}

#[test]
fn preview_missing_file_fails() {
    sheetgraph()
        .args(["preview", "does-not-exist.xlsx"])
        .assert()
        .failure();
}

#[test]
fn preview_bad_sheet_index_fails() {
    let dir = TempDir::new().unwrap();
    let path = sales_fixture(dir.path());

    sheetgraph()
        .args(["preview", "--sheet", "5"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

// ═══════════════════════════════════════════════════════════════════════════
// IMPORT
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn import_requires_a_file_argument() {
    sheetgraph().arg("import").assert().failure();
}

#[test]
fn import_against_unreachable_endpoint_fails() {
    let dir = TempDir::new().unwrap();
    let path = sales_fixture(dir.path());

    sheetgraph()
        .args(["import", "--uri", "bolt://127.0.0.1:1"])
        .arg(&path)
        .assert()
        .failure();
}
