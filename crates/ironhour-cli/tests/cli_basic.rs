//! End-to-end CLI tests.
//!
//! Each test runs the built binary against its own temporary data directory
//! (`IRONHOUR_DATA_DIR`), so state never leaks between tests or into the
//! developer's real profile.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn run_in(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_ironhour"))
        .env("IRONHOUR_DATA_DIR", dir)
        .args(args)
        .output()
        .expect("failed to execute CLI");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);
    (stdout, stderr, code)
}

fn onboard(dir: &Path, plan: &str) {
    let (_, stderr, code) = run_in(dir, &["profile", "init", "Ada", "--plan", plan]);
    assert_eq!(code, 0, "profile init failed: {stderr}");
}

#[test]
fn profile_init_and_show() {
    let dir = TempDir::new().unwrap();
    onboard(dir.path(), "builder");

    let (stdout, _, code) = run_in(dir.path(), &["profile", "show", "--json"]);
    assert_eq!(code, 0);
    let profile: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(profile["name"], "Ada");
    assert_eq!(profile["activePlan"], "BUILDER");
    assert_eq!(profile["history"], serde_json::json!([]));
}

#[test]
fn profile_init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    onboard(dir.path(), "builder");
    let (_, stderr, code) = run_in(dir.path(), &["profile", "init", "Eve", "--plan", "vitality"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("already exists"));
}

#[test]
fn session_start_requires_a_profile() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_in(dir.path(), &["session", "start"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("no profile"));
}

#[test]
fn session_status_reflects_calibration() {
    let dir = TempDir::new().unwrap();
    onboard(dir.path(), "builder");
    let (_, _, code) = run_in(dir.path(), &["session", "start"]);
    assert_eq!(code, 0);

    let (stdout, _, code) = run_in(dir.path(), &["session", "status"]);
    assert_eq!(code, 0);
    let snap: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snap["type"], "StateSnapshot");
    assert_eq!(snap["phase"], "CALIBRATION");
    assert_eq!(snap["remainingSecs"], 180);
    assert_eq!(snap["paused"], false);
}

#[test]
fn advance_with_empty_goal_rejects() {
    let dir = TempDir::new().unwrap();
    onboard(dir.path(), "builder");
    run_in(dir.path(), &["session", "start"]);

    let (_, stderr, code) = run_in(dir.path(), &["session", "advance"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("MISSING_GOAL"), "stderr was: {stderr}");

    // State unchanged: still calibrating.
    let (stdout, _, _) = run_in(dir.path(), &["session", "status"]);
    let snap: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snap["phase"], "CALIBRATION");
}

#[test]
fn full_builder_session_flow() {
    let dir = TempDir::new().unwrap();
    onboard(dir.path(), "builder");
    run_in(dir.path(), &["session", "start"]);
    run_in(dir.path(), &["session", "set", "goal", "Write 500 words"]);
    run_in(dir.path(), &["session", "set", "why", "ship the feature"]);

    let (stdout, stderr, code) = run_in(dir.path(), &["session", "advance"]);
    assert_eq!(code, 0, "advance failed: {stderr}");
    let event: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(event["type"], "PhaseAdvanced");
    assert_eq!(event["to"], "FOCUS");

    // FOCUS enters paused; start the hour explicitly.
    let (stdout, _, code) = run_in(dir.path(), &["session", "pause"]);
    assert_eq!(code, 0);
    let event: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(event["type"], "TimerResumed");

    let (_, _, code) = run_in(dir.path(), &["session", "tick", "--count", "5"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_in(dir.path(), &["session", "status"]);
    let snap: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snap["phase"], "FOCUS");
    assert_eq!(snap["remainingSecs"], 52 * 60 - 5);

    let (stdout, _, code) = run_in(dir.path(), &["session", "end-early", "--confirm"]);
    assert_eq!(code, 0);
    let event: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(event["to"], "REVIEW");
    assert_eq!(event["early"], true);

    run_in(dir.path(), &["session", "set", "reflection", "Finished the draft"]);
    let (stdout, stderr, code) = run_in(dir.path(), &["session", "advance"]);
    assert_eq!(code, 0, "submit failed: {stderr}");
    let event: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(event["type"], "SessionCompleted");
    assert_eq!(event["record"]["goal"], "Write 500 words");
    assert_eq!(
        event["record"]["meta"],
        serde_json::json!({ "interruptions": 0 })
    );

    // The machine is gone; history and stats picked the record up.
    let (_, _, code) = run_in(dir.path(), &["session", "status"]);
    assert_eq!(code, 1);
    let (stdout, _, _) = run_in(dir.path(), &["history", "list", "--json"]);
    let records: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 1);
    let (stdout, _, _) = run_in(dir.path(), &["stats", "show", "--json"]);
    let dashboard: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(dashboard["totalHours"], 1);
}

#[test]
fn emergency_break_counts_an_interruption() {
    let dir = TempDir::new().unwrap();
    onboard(dir.path(), "builder");
    run_in(dir.path(), &["session", "start"]);
    run_in(dir.path(), &["session", "set", "goal", "g"]);
    run_in(dir.path(), &["session", "set", "why", "w"]);
    run_in(dir.path(), &["session", "advance"]);
    run_in(dir.path(), &["session", "pause"]); // resume focus

    run_in(dir.path(), &["session", "emergency"]);
    // Overlay open: ticks are frozen.
    run_in(dir.path(), &["session", "tick", "--count", "10"]);
    let (stdout, _, _) = run_in(dir.path(), &["session", "status"]);
    let snap: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snap["remainingSecs"], 52 * 60);
    assert_eq!(snap["overlayOpen"], true);

    let (stdout, _, code) = run_in(dir.path(), &["session", "resolve", "--break"]);
    assert_eq!(code, 0);
    let event: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(event["brokeFence"], true);
    assert_eq!(event["interruptions"], 1);

    let (stdout, _, _) = run_in(dir.path(), &["session", "status"]);
    let snap: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snap["paused"], true);
    assert_eq!(snap["interruptions"], 1);
}

#[test]
fn session_exit_discards_without_a_record() {
    let dir = TempDir::new().unwrap();
    onboard(dir.path(), "vitality");
    run_in(dir.path(), &["session", "start"]);

    let (stdout, _, code) = run_in(dir.path(), &["session", "exit"]);
    assert_eq!(code, 0);
    let event: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(event["type"], "SessionExited");

    let (_, _, code) = run_in(dir.path(), &["session", "status"]);
    assert_eq!(code, 1);
    let (stdout, _, _) = run_in(dir.path(), &["history", "list", "--json"]);
    let records: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 0);
}

#[test]
fn foundation_gratitude_validation_via_cli() {
    let dir = TempDir::new().unwrap();
    onboard(dir.path(), "foundation");
    run_in(dir.path(), &["session", "start"]);
    run_in(dir.path(), &["session", "set", "goal", "read"]);
    run_in(dir.path(), &["session", "set", "why", "learn"]);
    run_in(dir.path(), &["session", "set", "gratitude-1", "family"]);

    let (_, stderr, code) = run_in(dir.path(), &["session", "advance"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("MISSING_GRATITUDES"));

    run_in(dir.path(), &["session", "set", "gratitude-2", "health"]);
    run_in(dir.path(), &["session", "set", "gratitude-3", "time"]);
    let (_, _, code) = run_in(dir.path(), &["session", "advance"]);
    assert_eq!(code, 0);
}

#[test]
fn config_get_set_list() {
    let dir = TempDir::new().unwrap();

    let (stdout, _, code) = run_in(dir.path(), &["config", "get", "durations.focus_secs"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "3120");

    let (_, _, code) = run_in(dir.path(), &["config", "set", "durations.focus_secs", "1500"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_in(dir.path(), &["config", "get", "durations.focus_secs"]);
    assert_eq!(stdout.trim(), "1500");

    let (stdout, _, code) = run_in(dir.path(), &["config", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("wall_slots = 365"));

    let (_, stderr, code) = run_in(dir.path(), &["config", "get", "nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown configuration key"));
}

#[test]
fn overridden_durations_reach_the_machine() {
    let dir = TempDir::new().unwrap();
    onboard(dir.path(), "builder");
    run_in(dir.path(), &["config", "set", "durations.calibration_secs", "60"]);
    run_in(dir.path(), &["session", "start"]);

    let (stdout, _, _) = run_in(dir.path(), &["session", "status"]);
    let snap: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snap["remainingSecs"], 60);
}

#[test]
fn history_wall_renders_grid() {
    let dir = TempDir::new().unwrap();
    onboard(dir.path(), "builder");

    let (stdout, _, code) = run_in(dir.path(), &["history", "wall"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("0 of 365 hours stacked"));
}

#[test]
fn profile_reset_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    onboard(dir.path(), "builder");

    let (_, stderr, code) = run_in(dir.path(), &["profile", "reset"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("--confirm"));

    let (_, _, code) = run_in(dir.path(), &["profile", "reset", "--confirm"]);
    assert_eq!(code, 0);
    let (_, _, code) = run_in(dir.path(), &["profile", "show"]);
    assert_eq!(code, 1);
}
