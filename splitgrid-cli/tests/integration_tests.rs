//! Integration tests for the splitgrid CLI
//!
//! These tests run the built binary end-to-end: replaying scripts, the demo,
//! settings handling and error exit codes.

#![allow(clippy::uninlined_format_args)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper to run the CLI with given arguments and an isolated settings file
fn run_cli(args: &[&str], config: Option<&Path>) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_splitgrid"));
    cmd.env_remove("SPLITGRID_CONFIG");
    // Keep the user's real settings file out of the tests
    cmd.env("XDG_CONFIG_HOME", std::env::temp_dir().join("splitgrid-cli-tests"));
    if let Some(path) = config {
        cmd.arg("--config").arg(path);
    }
    cmd.args(args).output().expect("Failed to execute CLI")
}

/// Helper to get stdout as string
fn stdout_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Helper to get stderr as string
fn stderr_str(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Writes a script file into a temp dir
fn write_script(dir: &TempDir, text: &str) -> PathBuf {
    let path = dir.path().join("layout.txt");
    std::fs::write(&path, text).expect("Failed to write script");
    path
}

fn replay(script: &str, extra: &[&str]) -> Output {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_script(&dir, script);
    let path = path.to_str().expect("temp path is not UTF-8");
    let mut args = vec!["replay", path];
    args.extend_from_slice(extra);
    run_cli(&args, None)
}

// ============================================================================
// Help
// ============================================================================

#[test]
fn test_help_command() {
    let output = run_cli(&["--help"], None);
    assert!(output.status.success(), "Help command should succeed");

    let stdout = stdout_str(&output);
    assert!(stdout.contains("splitgrid"), "Help should mention program name");
    assert!(stdout.contains("replay"), "Help should mention replay command");
    assert!(stdout.contains("demo"), "Help should mention demo command");
    assert!(stdout.contains("settings"), "Help should mention settings command");
    assert!(
        stdout.contains("Suppress logging and error messages"),
        "Help should describe what --quiet hides"
    );
}

#[test]
fn test_replay_help_mentions_format() {
    let output = run_cli(&["replay", "--help"], None);
    assert!(output.status.success());
    assert!(stdout_str(&output).contains("format"));
}

// ============================================================================
// Replay
// ============================================================================

#[test]
fn test_replay_single_leaf() {
    let output = replay("# nothing to do\n", &[]);
    assert!(output.status.success(), "stderr: {}", stderr_str(&output));

    let stdout = stdout_str(&output);
    assert!(stdout.contains("Grid: 1 rows x 1 columns"));
    assert!(stdout.contains("L0"));
    assert!(!stdout.contains("SPLITTER"));
}

#[test]
fn test_replay_vertical_split() {
    let output = replay("split L0 v 0.5\n", &[]);
    assert!(output.status.success(), "stderr: {}", stderr_str(&output));

    let stdout = stdout_str(&output);
    assert!(stdout.contains("Grid: 1 rows x 3 columns"));
    assert!(stdout.contains("Columns: content splitter content"));
    assert!(stdout.contains("L0 S0 L1"));
}

#[test]
fn test_replay_split_and_remove_round_trip() {
    let before = replay("split L0 v\n", &["--format", "json"]);
    let after = replay("split L0 v\nsplit L1 h\nremove L2\n", &["--format", "json"]);
    assert!(after.status.success(), "stderr: {}", stderr_str(&after));

    let before: serde_json::Value = serde_json::from_slice(&before.stdout).unwrap();
    let after: serde_json::Value = serde_json::from_slice(&after.stdout).unwrap();
    assert_eq!(before["rows"], after["rows"]);
    assert_eq!(before["columns"], after["columns"]);
    assert_eq!(before["pages"][1]["label"], after["pages"][1]["label"]);
    assert_eq!(before["splitters"][0]["column"], after["splitters"][0]["column"]);
}

#[test]
fn test_replay_json_output() {
    let output = replay("split L0 h 0.25\n", &["--format", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr_str(&output));

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Output should be valid JSON");
    assert_eq!(json["rows"], serde_json::json!([false, true, false]));
    assert_eq!(json["pages"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["splitters"][0]["orientation"], "horizontal");
    assert_eq!(json["splitters"][0]["ratio"], 0.25);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_remove_root_exits_with_layout_error() {
    let output = replay("remove L0\n", &[]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_str(&output).contains("cannot remove the root leaf"));
}

#[test]
fn test_out_of_range_resize_exits_with_layout_error() {
    let output = replay("split L0 v\nresize S0 1.5\n", &[]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_str(&output).contains("line 2"));
}

#[test]
fn test_syntax_error_exits_with_general_error() {
    let output = replay("split L0 sideways\n", &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_str(&output).contains("Script error at line 1"));
}

#[test]
fn test_missing_script_exits_with_general_error() {
    let output = run_cli(&["replay", "/nonexistent/splitgrid/script.txt"], None);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_quiet_suppresses_error_message() {
    let output = replay("remove L0\n", &["--quiet"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr_str(&output).is_empty());
}

// ============================================================================
// Demo and settings
// ============================================================================

#[test]
fn test_demo_command() {
    let output = run_cli(&["demo", "--show-script"], None);
    assert!(output.status.success(), "stderr: {}", stderr_str(&output));

    let stdout = stdout_str(&output);
    assert!(stdout.contains("split L0 vertical 0.7"));
    assert!(stdout.contains("Grid: 3 rows x 3 columns"));
}

#[test]
fn test_settings_file_sets_default_ratio() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("settings.toml");
    std::fs::write(&config, "default_ratio = 0.2\n").unwrap();
    let script = write_script(&dir, "split L0 v\n");

    let output = run_cli(
        &["replay", script.to_str().unwrap(), "--format", "json"],
        Some(&config),
    );
    assert!(output.status.success(), "stderr: {}", stderr_str(&output));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["splitters"][0]["ratio"], 0.2);
}

#[test]
fn test_invalid_settings_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("settings.toml");
    std::fs::write(&config, "default_ratio = 3.0\n").unwrap();

    let output = run_cli(&["demo"], Some(&config));
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_str(&output).contains("default_ratio"));
}

#[test]
fn test_settings_init_and_show() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("nested").join("settings.toml");

    let output = run_cli(&["settings", "init"], Some(&config));
    assert!(output.status.success(), "stderr: {}", stderr_str(&output));
    assert!(config.exists());

    let again = run_cli(&["settings", "init"], Some(&config));
    assert_eq!(again.status.code(), Some(1));

    let show = run_cli(&["settings", "show"], Some(&config));
    assert!(show.status.success());
    assert!(stdout_str(&show).contains("default_ratio = 0.5"));
}
