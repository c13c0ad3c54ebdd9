//! Binary integration tests for etf-valuation
//!
//! These tests run the actual binary as a subprocess against temp files.

// Skip binary tests during coverage builds
#![cfg(not(coverage))]
#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

use assert_cmd::Command;
use etf_valuation::excel::ExcelImporter;
use etf_valuation::history;
use etf_valuation::types::Record;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn etf(history_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("etf-valuation").unwrap();
    cmd.arg("--history")
        .arg(history_path)
        .env_remove("ETF_LANG")
        .env("NO_COLOR", "1");
    cmd
}

fn add_args<'a>(code: &'a str, price: &'a str, nav: &'a str, trend: &'a str) -> [&'a str; 9] {
    [
        "add", "--code", code, "--price", price, "--nav", nav, "--trend", trend,
    ]
}

#[test]
fn test_add_then_list() {
    let temp_dir = TempDir::new().unwrap();
    let history_path = temp_dir.path().join("history.json");

    etf(&history_path)
        .args(add_args("0050", "150.5", "149.8", "牛市"))
        .assert()
        .success()
        .stdout(predicate::str::contains("儲存成功"));

    etf(&history_path)
        .args(add_args("0056", "35.2", "35.1", "中性"))
        .assert()
        .success();

    etf(&history_path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("[0] 0050"))
        .stdout(predicate::str::contains("[1] 0056"));

    assert_eq!(history::load(&history_path).unwrap().len(), 2);
}

#[test]
fn test_add_blank_field_fails_with_localized_message() {
    let temp_dir = TempDir::new().unwrap();
    let history_path = temp_dir.path().join("history.json");

    etf(&history_path)
        .args(["--lang", "en"])
        .args(add_args("0050", "  ", "149.8", "牛市"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Market Price cannot be empty!"));

    assert!(!history_path.exists());
}

#[test]
fn test_show_entry() {
    let temp_dir = TempDir::new().unwrap();
    let history_path = temp_dir.path().join("history.json");
    history::save(
        &history_path,
        &[
            Record::new("0050", "150.5", "149.8", "牛市"),
            Record::new("0056", "35.2", "35.1", "中性"),
        ],
    )
    .unwrap();

    etf(&history_path)
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0056"))
        .stdout(predicate::str::contains("35.1"));

    etf(&history_path)
        .args(["show", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("請選擇一筆資料"));
}

#[test]
fn test_generate_from_history_and_inspect() {
    let temp_dir = TempDir::new().unwrap();
    let history_path = temp_dir.path().join("history.json");
    let output = temp_dir.path().join("0050.xlsx");
    history::save(&history_path, &[Record::new("0050", "150.5", "149.8", "牛市")]).unwrap();

    etf(&history_path)
        .args(["--lang", "en", "generate", "--from", "0", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Excel generated successfully!"));

    assert_eq!(
        ExcelImporter::new(&output).import().unwrap(),
        Record::new("0050", "150.5", "149.8", "牛市")
    );

    etf(&history_path)
        .arg("inspect")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("149.8"))
        .stdout(predicate::str::contains("NOW()"));
}

#[test]
fn test_generate_with_override_fields() {
    let temp_dir = TempDir::new().unwrap();
    let history_path = temp_dir.path().join("history.json");
    let output = temp_dir.path().join("override.xlsx");
    history::save(&history_path, &[Record::new("0050", "150.5", "149.8", "牛市")]).unwrap();

    etf(&history_path)
        .args(["generate", "--from", "0", "--trend", "熊市", "-o"])
        .arg(&output)
        .assert()
        .success();

    assert_eq!(ExcelImporter::new(&output).import().unwrap().trend, "熊市");
}

#[test]
fn test_generate_non_numeric_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let history_path = temp_dir.path().join("history.json");
    let output = temp_dir.path().join("bad.xlsx");

    etf(&history_path)
        .args(["generate", "--code", "0050", "--price", "abc", "--nav", "1", "-o"])
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("請確認價格欄位為數字"));

    assert!(!output.exists());
}

#[test]
fn test_malformed_history_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let history_path = temp_dir.path().join("history.json");
    fs::write(&history_path, "not json").unwrap();

    etf(&history_path)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load history"));
}

#[test]
fn test_form_session_via_stdin() {
    let temp_dir = TempDir::new().unwrap();
    let history_path = temp_dir.path().join("history.json");

    etf(&history_path)
        .args(["--lang", "en", "form"])
        .write_stdin("set code 0050\nset price 150.5\nset nav 149.8\nset trend 牛市\nsave\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved successfully!"));

    assert_eq!(
        history::load(&history_path).unwrap(),
        vec![Record::new("0050", "150.5", "149.8", "牛市")]
    );
}

#[test]
fn test_history_from_env() {
    let temp_dir = TempDir::new().unwrap();
    let history_path = temp_dir.path().join("env_history.json");
    history::save(&history_path, &[Record::new("00878", "21", "20.9", "震盪")]).unwrap();

    Command::cargo_bin("etf-valuation")
        .unwrap()
        .env("ETF_HISTORY_FILE", &history_path)
        .env("NO_COLOR", "1")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("00878"));
}

#[test]
fn test_lang_accepts_language_names() {
    let temp_dir = TempDir::new().unwrap();
    let history_path = temp_dir.path().join("history.json");

    etf(&history_path)
        .args(["--lang", "English", "show", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please select an entry"));

    etf(&history_path)
        .args(["--lang", "中文", "show", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("請選擇一筆資料"));

    etf(&history_path)
        .args(["--lang", "fr", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown language"));
}
