//! Smoke tests for the calcwidget binary

#![allow(deprecated)] // Command::cargo_bin
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn calcwidget() -> Command {
    let mut cmd = Command::cargo_bin("calcwidget").expect("calcwidget binary should exist");
    cmd.env_remove("CALCWIDGET_CONFIG")
        .env_remove("CALCWIDGET_STORE")
        .env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    calcwidget()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_lists_subcommands() {
    calcwidget()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("keys"))
        .stdout(predicate::str::contains("stats"))
        .stdout(predicate::str::contains("theme"));
}

#[test]
fn test_no_args_fails() {
    calcwidget().assert().failure();
}

// ============================================================================
// Calculation Tests
// ============================================================================

#[test]
fn test_keys_prints_result() {
    calcwidget()
        .args(["keys", "12+30{enter}"])
        .assert()
        .success()
        .stdout(predicate::str::contains("42"));
}

#[test]
fn test_keys_with_action() {
    calcwidget()
        .args(["keys", "81", "--action", "sqrt"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("9\n"));
}

#[test]
fn test_keys_unknown_action_fails() {
    calcwidget()
        .args(["keys", "1", "--action", "warp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown action 'warp'"));
}

#[test]
fn test_keys_divide_by_zero_warns() {
    calcwidget()
        .args(["keys", "5/0="])
        .assert()
        .success()
        .stderr(predicate::str::contains("Cannot divide by zero!"));
}

#[test]
fn test_keys_quiet_suppresses_notifications() {
    calcwidget()
        .args(["-q", "keys", "5/0="])
        .assert()
        .success()
        .stderr(predicate::str::contains("divide").not());
}

#[test]
fn test_stats_mean() {
    calcwidget()
        .args(["stats", "1, 2, 3, 4", "--op", "mean"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Mean: 2.5000\n"));
}

#[test]
fn test_stats_all() {
    calcwidget()
        .args(["stats", "2,4,4,4,5,5,7,9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Standard Deviation: 2.0000"))
        .stdout(predicate::str::contains("Mode: 4 (Frequency: 3)"));
}

#[test]
fn test_date_days_between() {
    calcwidget()
        .args(["date", "days-between", "2024-01-01", "--end", "2024-01-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Days between: 9 day(s)"));
}

#[test]
fn test_date_invalid_fails() {
    calcwidget()
        .args(["date", "day-of-week", "yesterday-ish"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please select valid dates"));
}

// ============================================================================
// Theme and Config Tests
// ============================================================================

#[test]
fn test_theme_toggle_persists() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("prefs.json");
    let store = store.to_str().unwrap();

    calcwidget()
        .args(["--store", store, "theme"])
        .assert()
        .success()
        .stdout(predicate::str::diff("light\n"));
    calcwidget()
        .args(["--store", store, "theme", "toggle"])
        .assert()
        .success()
        .stdout(predicate::str::diff("dark\n"));
    calcwidget()
        .args(["--store", store, "theme"])
        .assert()
        .success()
        .stdout(predicate::str::diff("dark\n"));

    let text = fs::read_to_string(dir.path().join("prefs.json")).unwrap();
    assert!(text.contains("calculator-theme"));
}

#[test]
fn test_config_prints_json() {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("widget.json");
    fs::write(&settings, r#"{"notification_ttl_ms": 750}"#).unwrap();

    calcwidget()
        .args(["--config", settings.to_str().unwrap(), "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"notification_ttl_ms\": 750"));
}

#[test]
fn test_config_bad_file_fails() {
    calcwidget()
        .args(["--config", "/nonexistent/widget.json", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
