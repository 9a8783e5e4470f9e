//! Integration tests for log destinations.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn command(temp_dir: &TempDir) -> Command {
    let root = temp_dir.path();
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_wordcast"));
    cmd.current_dir(root)
        .env("HOME", root)
        .env("XDG_CONFIG_HOME", root.join("config"))
        .env("XDG_STATE_HOME", root.join("state"))
        .env_remove("WORDCAST_LOG")
        .env_remove("WORDCAST_LOG_OUTPUT")
        .env_remove("WORDCAST_LOG_FORMAT");
    cmd
}

#[test]
fn test_default_logging_goes_to_stderr() {
    let temp_dir = TempDir::new().unwrap();
    let output = command(&temp_dir).arg("history").output().unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("wordcast starting"));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("wordcast starting"));
}

#[test]
fn test_file_output_writes_json_lines() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("logs").join("wordcast.log");

    let output = command(&temp_dir)
        .args(["--log-output", "file", "--log-format", "json", "--log-file"])
        .arg(&log_file)
        .arg("history")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stderr).contains("wordcast starting"));

    let contents = fs::read_to_string(&log_file).unwrap();
    let first: serde_json::Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
    assert_eq!(first["fields"]["message"], "wordcast starting");
}

#[test]
fn test_quiet_suppresses_logs() {
    let temp_dir = TempDir::new().unwrap();
    let output = command(&temp_dir).args(["--quiet", "history"]).output().unwrap();

    assert!(output.status.success());
    assert!(output.stderr.is_empty());
}
