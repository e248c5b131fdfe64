//! CLI dry-run integration tests
//!
//! Run the binary with --dry-run and check the command lines it prints.

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_cli(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_blueboy_commander"))
        .current_dir(dir.path())
        .env("RUST_LOG", "off")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_cli_begin_with_overrides() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(
        &temp_dir,
        &["--dry-run", "--set", "OWN_PERIOD=100", "--set", "OWN_MODE=Euler", "begin", "own"],
    );

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), ["BLUEBOY BEGINOWNATT with ID 16, PERIOD 100, TYPE 1"]);
}

#[test]
fn test_cli_begin_out_of_range_prints_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(&temp_dir, &["--dry-run", "--set", "TEST_PERIOD=70000", "begin", "TEST"]);

    assert!(output.status.success());
    assert!(stdout_lines(&output).is_empty());
}

#[test]
fn test_cli_reads_default_config_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("blueboy.toml"),
        r#"
[fields]
OWN_PERIOD = "70000"
OWN_MODE = "Euler"
TEST_PERIOD = 250
TEST_MODE = "Quaternion"
"#,
    )
    .unwrap();

    let output = run_cli(&temp_dir, &["--dry-run", "begin-all"]);

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), ["BLUEBOY BEGINTESTATT with ID 32, PERIOD 250, TYPE 2"]);
}

#[test]
fn test_cli_end_all() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(&temp_dir, &["end-all", "--dry-run"]);

    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        ["BLUEBOY ENDOWNATT with ID 17", "BLUEBOY ENDTESTATT with ID 33"]
    );
}

#[test]
fn test_cli_rejects_bad_override() {
    let temp_dir = TempDir::new().unwrap();
    let output = run_cli(&temp_dir, &["--dry-run", "--set", "OWN_PERIOD", "begin", "own"]);

    assert!(!output.status.success());
    assert!(stdout_lines(&output).is_empty());
}

#[test]
fn test_cli_rejects_missing_config() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.toml");
    let output = run_cli(
        &temp_dir,
        &["--dry-run", "--config", missing.to_str().unwrap(), "end", "own"],
    );

    assert!(!output.status.success());
}
