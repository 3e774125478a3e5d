//! Command-line behavior of the `mancala-tree` binary.

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mancala-tree"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// =============================================================================
// Usage Errors
// =============================================================================

#[test]
fn test_missing_arguments_exit_one() {
    let output = run(&[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Usage"), "{}", stderr(&output));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_extra_argument_exits_one() {
    let output = run(&["2", "1", "3"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Usage"), "{}", stderr(&output));
}

#[test]
fn test_help_exits_zero() {
    let output = run(&["--help"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage"));
}

// =============================================================================
// Rejected Runs
// =============================================================================

#[test]
fn test_zero_tokens_exit_one() {
    let output = run(&["2", "0"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("invalid board"), "{}", stderr(&output));
}

#[test]
fn test_too_many_tokens_exit_one() {
    // 8 pits a side with 16 tokens each is 256 tokens, past a u8 cell.
    let output = run(&["8", "16"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("invalid board"), "{}", stderr(&output));
}

#[test]
fn test_pool_exhaustion_exits_one() {
    let output = run(&["3", "2", "--pool-slots", "4"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("enumeration failed"), "{}", stderr(&output));
    assert!(output.stdout.is_empty());
}

// =============================================================================
// Totals
// =============================================================================

#[test]
fn test_text_totals() {
    let output = run(&["2", "1"]);
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(
        stdout.starts_with(" total games: 3\ntotal states: 8\n"),
        "{stdout}"
    );
    assert!(stdout.contains("shortest game: 2\n"));
    assert!(stdout.contains("longest game: 3\n"));
}

#[test]
fn test_text_totals_without_metrics() {
    let output = run(&["2", "1", "--no-metrics"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        " total games: 3\ntotal states: 8\n"
    );
}

#[test]
fn test_json_totals() {
    let output = run(&["2", "1", "--format", "json"]);
    assert_eq!(output.status.code(), Some(0));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(report["games"], 3);
    assert_eq!(report["positions"], 8);
    assert_eq!(report["min_game_length"], 2);
    assert_eq!(report["max_game_length"], 3);
    assert_eq!(report["peak_depth"], 2);
}

#[test]
fn test_heap_fallback_completes_small_pool() {
    let output = run(&["3", "2", "--pool-slots", "4", "--fallback", "heap"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8(output.stdout)
        .unwrap()
        .starts_with(" total games: 2355\ntotal states: 7179\n"));
}
