use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SELVA_CARD: &str = "Selva
DATA MANAGER
+123-456-7890
+123-456-7891
WWW XYZI.com
hello@XYZ1.com
123 ABC St , Chennai;
TamilNadu 600113
selva digitals
";

/// A `bizcard` command isolated from the user's config directory.
fn bizcard(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bizcard").unwrap();
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

fn write_tokens(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("selva.txt");
    fs::write(&path, SELVA_CARD).unwrap();
    path
}

#[test]
fn parse_prints_text_summary() {
    let dir = TempDir::new().unwrap();
    let tokens = write_tokens(&dir);

    bizcard(dir.path())
        .arg("parse")
        .arg(&tokens)
        .assert()
        .success()
        .stdout(predicate::str::contains("Selva"))
        .stdout(predicate::str::contains("+123-456-7890 +123-456-7891"))
        .stdout(predicate::str::contains("www.XYZI.com"))
        .stdout(predicate::str::contains("600113"));
}

#[test]
fn parse_json_has_every_field() {
    let dir = TempDir::new().unwrap();
    let tokens = write_tokens(&dir);

    let output = bizcard(dir.path())
        .args(["parse", "-f", "json"])
        .arg(&tokens)
        .output()
        .unwrap();
    assert!(output.status.success());

    let record: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record["name"], "Selva");
    assert_eq!(record["designation"], "DATA MANAGER");
    assert_eq!(record["company"], "selva digitals");
    assert_eq!(record["email"], "hello@XYZ1.com");
    assert_eq!(record["address"], "123 ABC St");
    assert_eq!(record["city"], "Chennai");
    assert_eq!(record["state"], "");
    assert_eq!(record["postal_code"], "600113");
}

#[test]
fn parse_reads_stdin() {
    let dir = TempDir::new().unwrap();

    bizcard(dir.path())
        .args(["parse", "-f", "csv", "-"])
        .write_stdin(SELVA_CARD)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("name,designation,company"))
        .stdout(predicate::str::contains("hello@XYZ1.com"));
}

#[test]
fn parse_empty_input_reports_notice() {
    let dir = TempDir::new().unwrap();

    bizcard(dir.path())
        .args(["parse", "-"])
        .write_stdin("")
        .assert()
        .success()
        .stderr(predicate::str::contains("OCR returned no text"));
}

#[test]
fn parse_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    bizcard(dir.path())
        .args(["parse", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn cards_list_on_empty_database() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("cards.db");

    bizcard(dir.path())
        .arg("--db")
        .arg(&db)
        .args(["cards", "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No cards stored"));

    bizcard(dir.path())
        .arg("--db")
        .arg(&db)
        .args(["cards", "delete", "1"])
        .assert()
        .failure();
}

#[test]
fn config_init_then_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");

    bizcard(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    bizcard(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "storage.database_path", "cards.db"])
        .assert()
        .success();

    bizcard(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "storage.database_path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"cards.db\""));
}
