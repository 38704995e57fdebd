//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Each test
//! points TIMECHALLENGE_HOME at its own temporary directory.

mod common;

use std::time::Duration;

use common::*;

#[test]
fn test_list_default_ladder() {
    let home = tempfile::tempdir().unwrap();
    let out = run_cli_success(home.path(), &["list"]);
    assert_contains(&out, "Welcome unknown entity");
    assert_contains(&out, "Easy");
    assert_contains(&out, "1 second");
    assert_contains(&out, "20 seconds");
    assert!(home.path().join("config.toml").exists());
}

#[test]
fn test_list_json() {
    let home = tempfile::tempdir().unwrap();
    let out = run_cli_success(home.path(), &["list", "--json"]);
    let rows: serde_json::Value = serde_json::from_str(&out).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[1]["title"], "Medium");
    assert_eq!(rows[1]["label"], "5 seconds");
}

#[test]
fn test_simulate_timer_runs_out() {
    let home = tempfile::tempdir().unwrap();
    let out = run_cli_success(home.path(), &["simulate", "--target", "5"]);
    let events = parse_json_lines(&out);
    assert_eq!(
        event_types(&events),
        vec![
            "ChallengeStarted",
            "ChallengeLost",
            "ResultDialogRequested",
            "StateSnapshot"
        ]
    );
    let snapshot = events.last().unwrap();
    assert_eq!(snapshot["state"]["state"], "resolved");
    assert_eq!(snapshot["state"]["outcome"], "lost");
    assert_eq!(snapshot["status"], "You lost!");
}

#[test]
fn test_simulate_stop_in_time() {
    let home = tempfile::tempdir().unwrap();
    let out = run_cli_success(
        home.path(),
        &[
            "simulate",
            "--target",
            "5",
            "--stop-after",
            "2000",
            "--advance",
            "10000",
        ],
    );
    let events = parse_json_lines(&out);
    assert_eq!(
        event_types(&events),
        vec![
            "ChallengeStarted",
            "ChallengeWon",
            "ResultDialogRequested",
            "StateSnapshot"
        ]
    );
    assert_eq!(events[1]["elapsed_ms"], 2000);
    assert_eq!(events[1]["remaining_ms"], 3000);
    assert_eq!(events[3]["status"], "You won!");
}

#[test]
fn test_simulate_late_stop_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) = run_cli(
        home.path(),
        &["simulate", "--target", "1", "--stop-after", "1500"],
    );
    assert_eq!(code, 0);
    assert_contains(&stderr, "stop rejected");
    let events = parse_json_lines(&stdout);
    assert_eq!(events.last().unwrap()["status"], "You lost!");
}

#[test]
fn test_simulate_rejects_zero_target() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, _) = run_cli_failure(home.path(), &["simulate", "--target", "0"]);
    assert_contains(&stderr, "invalid duration");
}

#[test]
fn test_player_set_and_clear() {
    let home = tempfile::tempdir().unwrap();
    let out = run_cli_success(home.path(), &["player", "set", "Ada"]);
    assert_contains(&out, "Welcome Ada");
    let out = run_cli_success(home.path(), &["player", "show"]);
    assert_contains(&out, "Welcome Ada");
    let out = run_cli_success(home.path(), &["player", "clear"]);
    assert_contains(&out, "Welcome unknown entity");
}

#[test]
fn test_config_get_set() {
    let home = tempfile::tempdir().unwrap();
    let out = run_cli_success(home.path(), &["config", "get", "challenges.1.title"]);
    assert_eq!(out.trim(), "Medium");

    let out = run_cli_success(
        home.path(),
        &["config", "set", "challenges.1.target_time_secs", "7"],
    );
    assert_eq!(out.trim(), "ok");
    let out = run_cli_success(home.path(), &["list"]);
    assert_contains(&out, "7 seconds");
}

#[test]
fn test_config_set_rejects_bad_values() {
    let home = tempfile::tempdir().unwrap();
    run_cli_failure(home.path(), &["config", "set", "runtime.nope", "1"]);
    run_cli_failure(
        home.path(),
        &["config", "set", "challenges.0.target_time_secs", "0"],
    );
    let out = run_cli_success(home.path(), &["config", "get", "challenges.0.target_time_secs"]);
    assert_eq!(out.trim(), "1.0");
}

#[test]
fn test_config_get_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, _) = run_cli_failure(home.path(), &["config", "get", "nope"]);
    assert_contains(&stderr, "unknown key");
}

#[test]
fn test_config_list_and_reset() {
    let home = tempfile::tempdir().unwrap();
    run_cli_success(home.path(), &["player", "set", "Grace"]);
    let out = run_cli_success(home.path(), &["config", "reset"]);
    assert_contains(&out, "config reset to defaults");
    let out = run_cli_success(home.path(), &["config", "list"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert!(json["player"]["name"].is_null());
    assert_eq!(json["runtime"]["tick_interval_ms"], 10);
}

#[test]
fn test_play_unknown_challenge() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, _) = run_cli_failure(home.path(), &["play", "Impossible"]);
    assert_contains(&stderr, "unknown challenge");
}

#[test]
fn test_play_enter_starts_then_stops_in_time() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) = run_cli_with_input(
        home.path(),
        &["play", "extreme"],
        &[(Duration::ZERO, ""), (Duration::ZERO, "")],
    );
    assert_eq!(code, 0, "play failed: {stderr}");
    assert_contains(&stdout, "Welcome unknown entity");
    assert_contains(&stdout, "Time inactive");
    assert_contains(&stdout, "Time is running");
    assert_contains(&stdout, "You won!");
    assert_contains(&stdout, "seconds left");
    assert!(!stdout.contains("You lost"));
}

#[test]
fn test_play_late_stop_reports_loss() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, stderr, code) = run_cli_with_input(
        home.path(),
        &["play", "easy"],
        &[(Duration::ZERO, ""), (Duration::from_millis(2000), "")],
    );
    assert_eq!(code, 0, "play failed: {stderr}");
    assert_contains(&stdout, "Easy: stop the timer before it runs out (1 second).");
    assert_contains(&stdout, "You lost!");
    assert_contains(&stdout, "did not stop the timer");
    assert!(!stdout.contains("You won"));
}

#[test]
fn test_play_quit_while_idle() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) =
        run_cli_with_input(home.path(), &["play", "2"], &[(Duration::ZERO, "q")]);
    assert_eq!(code, 0);
    assert_contains(&stdout, "Medium");
    assert!(!stdout.contains("Time is running"));
}

#[test]
fn test_player_blank_name_clears() {
    let home = tempfile::tempdir().unwrap();
    run_cli_success(home.path(), &["player", "set", "Ada"]);
    run_cli_success(home.path(), &["config", "set", "player.name", "   "]);
    let out = run_cli_success(home.path(), &["player", "show"]);
    assert_contains(&out, "Welcome unknown entity");
}

#[test]
fn test_completions() {
    let home = tempfile::tempdir().unwrap();
    let out = run_cli_success(home.path(), &["completions", "bash"]);
    assert_contains(&out, "timechallenge");
}
