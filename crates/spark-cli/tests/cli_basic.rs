//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against an isolated data
//! directory (SPARK_DATA_DIR) in local-only mode, so no backend service
//! is needed.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "-p", "spark-cli", "--"])
        .args(args)
        .env("SPARK_DATA_DIR", data_dir)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Fresh data dir switched to local-only mode.
fn setup() -> TempDir {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "storage.mode", "local-only"]);
    assert_eq!(code, 0, "config set failed: {stderr}");
    dir
}

fn created_id(stdout: &str) -> String {
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("Entry created: "))
        .expect("no created id in output")
        .trim()
        .to_string()
}

#[test]
fn test_entry_create_and_list() {
    let dir = setup();
    let (stdout, stderr, code) = run_cli(
        dir.path(),
        &["entry", "create", "First memory", "--body", "hello"],
    );
    assert_eq!(code, 0, "create failed: {stderr}");
    assert!(stdout.contains("Entry created:"));

    let (stdout, _, code) = run_cli(dir.path(), &["entry", "list", "--json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let entries = parsed.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["title"], "First memory");
    assert!(entries[0]["unlocked_at"].is_null());
}

#[test]
fn test_entry_get_update_delete() {
    let dir = setup();
    let (stdout, _, _) = run_cli(dir.path(), &["entry", "create", "Editable", "--body", "v1"]);
    let id = created_id(&stdout);

    let (stdout, _, code) = run_cli(dir.path(), &["entry", "get", &id]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Editable"));

    let (stdout, _, code) = run_cli(
        dir.path(),
        &["entry", "update", &id, "--title", "Edited", "--body", "v2"],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("Entry updated:"));

    let (stdout, _, _) = run_cli(dir.path(), &["entry", "get", &id]);
    assert!(stdout.contains("Edited"));
    assert!(stdout.contains("v2"));

    let (stdout, _, code) = run_cli(dir.path(), &["entry", "delete", &id]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Entry deleted:"));

    let (_, stderr, code) = run_cli(dir.path(), &["entry", "get", &id]);
    assert_eq!(code, 1);
    assert!(stderr.contains("entry not found"));
}

#[test]
fn test_refresh_unlocks_due_entry() {
    let dir = setup();
    let (stdout, _, _) = run_cli(
        dir.path(),
        &[
            "entry",
            "create",
            "Old memory",
            "--earliest-unlock",
            "2020-01-01T00:00:00Z",
        ],
    );
    let id = created_id(&stdout);

    let (stdout, stderr, code) = run_cli(dir.path(), &["refresh"]);
    assert_eq!(code, 0, "refresh failed: {stderr}");
    assert!(stdout.contains(&format!("Unlocked {id}")));

    // Idempotent: a second pass unlocks nothing.
    let (stdout, _, _) = run_cli(dir.path(), &["refresh"]);
    assert!(stdout.contains("No entries unlocked."));

    let (stdout, _, code) = run_cli(dir.path(), &["history"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Old memory"));
}

#[test]
fn test_refresh_respects_conditions() {
    let dir = setup();
    let (stdout, _, _) = run_cli(
        dir.path(),
        &[
            "entry",
            "create",
            "Rainy day",
            "--weather",
            "rain",
            "--mood",
            "calm",
            "--earliest-unlock",
            "2020-01-01T00:00:00Z",
        ],
    );
    let id = created_id(&stdout);

    // Weather alone is not enough.
    let (stdout, _, _) = run_cli(dir.path(), &["refresh", "--weather", "rain"]);
    assert!(stdout.contains("No entries unlocked."));

    let (stdout, _, _) = run_cli(
        dir.path(),
        &["refresh", "--weather", "rain", "--mood", "calm"],
    );
    assert!(stdout.contains(&format!("Unlocked {id}")));
    assert!(stdout.contains("weather"));
    assert!(stdout.contains("mood"));
}

#[test]
fn test_locked_entry_stays_locked_before_window() {
    let dir = setup();
    // Default earliest unlock is creation + 1 day.
    run_cli(dir.path(), &["entry", "create", "Fresh"]);

    let (stdout, _, _) = run_cli(dir.path(), &["refresh"]);
    assert!(stdout.contains("No entries unlocked."));

    let (stdout, _, _) = run_cli(dir.path(), &["entry", "list", "--locked"]);
    assert!(stdout.contains("Fresh"));
}

#[test]
fn test_create_rejects_empty_title() {
    let dir = setup();
    let (_, stderr, code) = run_cli(dir.path(), &["entry", "create", "   "]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_create_rejects_bad_weather_label() {
    let dir = setup();
    let (_, stderr, code) = run_cli(
        dir.path(),
        &["entry", "create", "Test", "--weather", "sunny-ish"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown weather"));
}

#[test]
fn test_config_get_set_list() {
    let dir = setup();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "storage.mode"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "local-only");

    let (_, _, code) = run_cli(
        dir.path(),
        &["config", "set", "backend.base_url", "http://journal.local:8080"],
    );
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(dir.path(), &["config", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("backend.base_url = http://journal.local:8080"));

    let (_, stderr, code) = run_cli(dir.path(), &["config", "get", "backend.port"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown configuration key"));
}

#[test]
fn test_entry_search() {
    let dir = setup();
    run_cli(dir.path(), &["entry", "create", "Beach trip", "--body", "waves"]);
    run_cli(dir.path(), &["entry", "create", "Work notes", "--body", "meetings"]);

    let (stdout, _, code) = run_cli(dir.path(), &["entry", "list", "--search", "beach", "--json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
    assert_eq!(parsed[0]["title"], "Beach trip");
}
