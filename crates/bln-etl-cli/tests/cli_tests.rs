//! Integration tests for bln-etl-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::fs::File;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;
use zip::ZipArchive;

fn bln_etl_cmd() -> Command {
    cargo_bin_cmd!("bln-etl")
}

/// Builds `files/{test.csv,test.json,test2.csv,nested/test3.csv,.hidden/.secret.txt}`.
fn fixture_tree(temp: &TempDir) -> PathBuf {
    let files = temp.path().join("files");
    fs::create_dir_all(files.join("nested")).unwrap();
    fs::create_dir_all(files.join(".hidden")).unwrap();
    fs::write(files.join("test.csv"), "a,b\n1,2\n").unwrap();
    fs::write(files.join("test.json"), "{}\n").unwrap();
    fs::write(files.join("test2.csv"), "c,d\n3,4\n").unwrap();
    fs::write(files.join("nested/test3.csv"), "e,f\n5,6\n").unwrap();
    fs::write(files.join(".hidden/.secret.txt"), "shh\n").unwrap();
    files
}

fn namelist(path: &Path) -> Vec<String> {
    let archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    archive.file_names().map(ToString::to_string).collect()
}

#[test]
fn test_version_flag() {
    bln_etl_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bln-etl"));
}

#[test]
fn test_help_flag() {
    bln_etl_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Command-line utility"));
}

#[test]
fn test_add_dir_help() {
    bln_etl_cmd()
        .arg("add-dir")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--include-hidden"));
}

#[test]
fn test_add_files() {
    let temp = TempDir::new().unwrap();
    let files = fixture_tree(&temp);
    let archive = temp.path().join("out.zip");

    bln_etl_cmd()
        .arg("add")
        .arg(&archive)
        .arg(files.join("test.csv"))
        .arg(files.join("nested/test3.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 2 files"));

    assert_eq!(namelist(&archive), vec!["test.csv", "test3.csv"]);
}

#[test]
fn test_add_drop_root_keeps_structure() {
    let temp = TempDir::new().unwrap();
    let files = fixture_tree(&temp);
    let archive = temp.path().join("out.zip");

    bln_etl_cmd()
        .arg("add")
        .arg(&archive)
        .arg(files.join("nested/test3.csv"))
        .arg("--drop-root")
        .arg("files")
        .assert()
        .success();

    assert_eq!(namelist(&archive), vec!["nested/test3.csv"]);
}

#[test]
fn test_add_rename() {
    let temp = TempDir::new().unwrap();
    let files = fixture_tree(&temp);
    let archive = temp.path().join("out.zip");

    bln_etl_cmd()
        .arg("add")
        .arg(&archive)
        .arg(files.join("test.csv"))
        .arg("--rename")
        .arg("latest.csv")
        .assert()
        .success();

    assert_eq!(namelist(&archive), vec!["latest.csv"]);
}

#[test]
fn test_add_rename_requires_single_file() {
    let temp = TempDir::new().unwrap();
    let files = fixture_tree(&temp);
    let archive = temp.path().join("out.zip");

    bln_etl_cmd()
        .arg("add")
        .arg(&archive)
        .arg(files.join("test.csv"))
        .arg(files.join("test2.csv"))
        .arg("--rename")
        .arg("latest.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--rename needs exactly one FILE"));

    assert!(!archive.exists());
}

#[test]
fn test_add_missing_drop_root_fails_with_hint() {
    let temp = TempDir::new().unwrap();
    let files = fixture_tree(&temp);
    let archive = temp.path().join("out.zip");

    bln_etl_cmd()
        .arg("add")
        .arg(&archive)
        .arg(files.join("test.csv"))
        .arg("--drop-root")
        .arg("not-there")
        .assert()
        .failure()
        .stderr(predicate::str::contains("HINT"));
}

#[test]
fn test_add_overwrite_truncates_once() {
    let temp = TempDir::new().unwrap();
    let files = fixture_tree(&temp);
    let archive = temp.path().join("out.zip");

    bln_etl_cmd()
        .arg("add")
        .arg(&archive)
        .arg(files.join("test.json"))
        .assert()
        .success();

    bln_etl_cmd()
        .arg("add")
        .arg(&archive)
        .arg(files.join("test.csv"))
        .arg(files.join("test2.csv"))
        .arg("--overwrite")
        .assert()
        .success();

    assert_eq!(namelist(&archive), vec!["test.csv", "test2.csv"]);
}

#[test]
fn test_add_duplicate_fails() {
    let temp = TempDir::new().unwrap();
    let files = fixture_tree(&temp);
    let archive = temp.path().join("out.zip");

    for expect_success in [true, false] {
        let assert = bln_etl_cmd()
            .arg("add")
            .arg(&archive)
            .arg(files.join("test.csv"))
            .assert();
        if expect_success {
            assert.success();
        } else {
            assert
                .failure()
                .stderr(predicate::str::contains("already contains 'test.csv'"));
        }
    }
}

#[test]
fn test_add_dir_default() {
    let temp = TempDir::new().unwrap();
    let files = fixture_tree(&temp);
    let archive = temp.path().join("out.zip");

    bln_etl_cmd()
        .arg("add-dir")
        .arg(&archive)
        .arg(&files)
        .assert()
        .success()
        .stdout(predicate::str::contains("Archive updated"));

    assert_eq!(
        namelist(&archive),
        vec!["test.csv", "test.json", "test2.csv", "nested/test3.csv"]
    );
}

#[test]
fn test_add_dir_pattern_and_hidden() {
    let temp = TempDir::new().unwrap();
    let files = fixture_tree(&temp);
    let archive = temp.path().join("out.zip");

    bln_etl_cmd()
        .arg("add-dir")
        .arg(&archive)
        .arg(&files)
        .arg("--pattern")
        .arg("**/*.txt")
        .arg("--include-hidden")
        .assert()
        .success();

    assert_eq!(namelist(&archive), vec![".hidden/.secret.txt"]);
}

#[test]
fn test_add_dir_invalid_pattern() {
    let temp = TempDir::new().unwrap();
    let files = fixture_tree(&temp);
    let archive = temp.path().join("out.zip");

    bln_etl_cmd()
        .arg("add-dir")
        .arg(&archive)
        .arg(&files)
        .arg("--pattern")
        .arg("[unclosed")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --pattern"));

    assert!(!archive.exists());
}

#[test]
fn test_add_dir_json_output() {
    let temp = TempDir::new().unwrap();
    let files = fixture_tree(&temp);
    let archive = temp.path().join("out.zip");

    let output = bln_etl_cmd()
        .arg("--json")
        .arg("add-dir")
        .arg(&archive)
        .arg(&files)
        .arg("--store")
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["operation"], "add-dir");
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["files_added"], 4);
    assert_eq!(json["data"]["hidden_skipped"], 1);
}

#[test]
fn test_list() {
    let temp = TempDir::new().unwrap();
    let files = fixture_tree(&temp);
    let archive = temp.path().join("out.zip");

    bln_etl_cmd()
        .arg("add-dir")
        .arg(&archive)
        .arg(files.join("nested"))
        .assert()
        .success();

    bln_etl_cmd()
        .arg("list")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("test3.csv"));
}

#[test]
fn test_list_missing_archive_json_error() {
    let temp = TempDir::new().unwrap();

    let output = bln_etl_cmd()
        .arg("list")
        .arg(temp.path().join("missing.zip"))
        .arg("--json")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["operation"], "list");
    assert_eq!(json["status"], "error");
    assert!(json["error"].as_str().unwrap().contains("I/O error"));
}

#[test]
fn test_projects_without_token() {
    let temp = TempDir::new().unwrap();

    bln_etl_cmd()
        .current_dir(temp.path())
        .env_remove("BLN_API_KEY")
        .arg("projects")
        .assert()
        .failure()
        .stderr(predicate::str::contains("BLN_API_KEY"));
}

#[test]
fn test_upload_missing_file() {
    let temp = TempDir::new().unwrap();

    bln_etl_cmd()
        .current_dir(temp.path())
        .arg("upload")
        .arg("project-id")
        .arg(temp.path().join("nope.csv"))
        .arg("--token")
        .arg("t")
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_completion_bash() {
    bln_etl_cmd()
        .arg("completion")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("bln-etl"));
}
