//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data
//! directory (BDAY_ENV=dev) and verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "bday-cli", "--"])
        .args(args)
        .env("BDAY_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_record_add_and_delete() {
    let (stdout, stderr, code) = run_cli(&[
        "record", "add", "CLI Test", "12", "25", "--owner", "cli-e2e-add",
    ]);
    assert_eq!(code, 0, "record add failed: {stderr}");
    assert!(stdout.contains("Birthday created:"));

    let (stdout, _, code) = run_cli(&["record", "list", "--owner", "cli-e2e-add"]);
    assert_eq!(code, 0);
    let records: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let id = records[0]["id"].as_str().unwrap().to_string();

    let (stdout, _, code) = run_cli(&["record", "delete", &id, "--owner", "cli-e2e-add"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Birthday deleted:"));
}

#[test]
fn test_record_update_keeps_and_clears_notes() {
    let (stdout, stderr, code) = run_cli(&[
        "record",
        "add",
        "Notes Test",
        "12",
        "25",
        "--notes",
        "gift ideas",
        "--owner",
        "cli-e2e-notes",
    ]);
    assert_eq!(code, 0, "record add failed: {stderr}");
    let id = stdout
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("Birthday created: "))
        .expect("created id line")
        .to_string();

    // omitting --notes keeps the existing value
    let (_, _, code) = run_cli(&[
        "record", "update", &id, "--name", "Renamed", "--owner", "cli-e2e-notes",
    ]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(&["record", "get", &id, "--owner", "cli-e2e-notes"]);
    let record: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(record["notes"], "gift ideas");

    let (_, _, code) = run_cli(&[
        "record", "update", &id, "--clear-notes", "--owner", "cli-e2e-notes",
    ]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(&["record", "get", &id, "--owner", "cli-e2e-notes"]);
    let record: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(record["notes"].is_null());

    let _ = run_cli(&["record", "delete", &id, "--owner", "cli-e2e-notes"]);
}

#[test]
fn test_record_add_rejects_invalid_date() {
    let (_, stderr, code) = run_cli(&[
        "record", "add", "Bad Date", "2", "30", "--owner", "cli-e2e-invalid",
    ]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid calendar date"));
}

#[test]
fn test_view_upcoming() {
    let (_, stderr, code) = run_cli(&["view", "upcoming", "--owner", "cli-e2e-view"]);
    assert_eq!(code, 0, "view upcoming failed: {stderr}");

    let (_, _, code) = run_cli(&["view", "today", "--owner", "cli-e2e-view"]);
    assert_eq!(code, 0);
}

#[test]
fn test_notify_plan_is_json() {
    let (stdout, stderr, code) = run_cli(&["notify", "plan", "--owner", "cli-e2e-notify"]);
    assert_eq!(code, 0, "notify plan failed: {stderr}");
    assert!(serde_json::from_str::<serde_json::Value>(&stdout).is_ok());
}

#[test]
fn test_watch_command_is_wired_up() {
    let (stdout, stderr, code) = run_cli(&["watch", "--help"]);
    assert_eq!(code, 0, "watch help failed: {stderr}");
    assert!(stdout.contains("--interval"));
    assert!(stdout.contains("--window"));
}

#[test]
fn test_config_show() {
    let (stdout, stderr, code) = run_cli(&["config", "show"]);
    assert_eq!(code, 0, "config show failed: {stderr}");
    let config: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(config["window_days"].is_number());
}
