//! Command-line integration tests for the `swarm` binary.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::io::Write;
use std::process::{Command, Output};

const ARENA: &str = include_str!("../levels/arena.json");

fn swarm(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_swarm"))
        .args(args)
        .output()
        .unwrap()
}

fn level_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_validate_accepts_sample_level() {
    let level = level_file(ARENA);
    let output = swarm(&["validate", level.path().to_str().unwrap()]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Validation successful!"));
    assert!(stdout.contains("Spawners:    3"));
}

#[test]
fn test_validate_rejects_missing_goal() {
    let level = level_file(r#"{ "stage": { "left": 0, "top": 0, "right": 100, "bottom": 100 } }"#);
    let output = swarm(&["validate", level.path().to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("goal"));
}

#[test]
fn test_validate_rejects_malformed_json() {
    let level = level_file("{ not json");
    let output = swarm(&["validate", level.path().to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Error:"));
}

#[test]
fn test_run_json_is_reproducible() {
    let level = level_file(ARENA);
    let path = level.path().to_str().unwrap();
    let args = ["run", path, "--seed", "3", "--ticks", "120", "--format", "json"];

    let first = swarm(&args);
    let second = swarm(&args);

    assert!(first.status.success(), "{}", String::from_utf8_lossy(&first.stderr));
    assert_eq!(first.stdout, second.stdout);
    let report: serde_json::Value = serde_json::from_slice(&first.stdout).unwrap();
    assert_eq!(report["seed"], 3);
    assert!(report["ticks"].as_u64().unwrap() <= 120);
}

#[test]
fn test_run_snapshot_format() {
    let level = level_file(ARENA);
    let output = swarm(&[
        "run",
        level.path().to_str().unwrap(),
        "--seed",
        "5",
        "--ticks",
        "30",
        "--format",
        "snapshot",
    ]);

    assert!(output.status.success());
    let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(snapshot["tick"], 30);
    assert!(!snapshot["walls"].as_array().unwrap().is_empty());
    assert_eq!(snapshot["hud"]["goal_description"], "Clear out the horde");
}

#[test]
fn test_soak_csv() {
    let level = level_file(ARENA);
    let output = swarm(&[
        "soak",
        level.path().to_str().unwrap(),
        "--runs",
        "4",
        "--seed",
        "10",
        "--ticks",
        "60",
        "--format",
        "csv",
    ]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("outcome,runs,rate"));
    assert!(stdout.contains("tick_limit,4,"));
}
