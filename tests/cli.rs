//! Command-line tests for s3tree
//!
//! These only cover paths that end before any AWS call is made.


use assert_cmd::Command;
use harness::run_s3tree;
use predicates::prelude::*;

fn s3tree() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_s3tree"));
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_help_lists_options() {
    s3tree()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--bucket-name"))
        .stdout(predicate::str::contains("--cli-profile"))
        .stdout(predicate::str::contains("--prefix"));
}

#[test]
fn test_bucket_name_is_required() {
    s3tree()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--bucket-name"));
}

#[test]
fn test_invalid_metric_window() {
    let (stdout, stderr, success) = run_s3tree(&["-b", "bkt", "--metric-window", "soon"]);
    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("s3tree: invalid configuration"), "{}", stderr);
    assert!(stderr.contains("--metric-window"), "{}", stderr);
}

#[test]
fn test_invalid_ignore_pattern() {
    s3tree()
        .args(["-b", "bkt", "-I", "[", "--yes"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("s3tree: invalid ignore pattern"));
}

#[test]
fn test_zero_level_is_rejected() {
    s3tree()
        .args(["-b", "bkt", "-L", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("level must be at least 1"));
}

#[test]
fn test_invalid_color_mode() {
    s3tree()
        .args(["-b", "bkt", "--color", "sometimes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sometimes"));
}

#[test]
fn test_invalid_log_level() {
    s3tree()
        .args(["-b", "bkt", "--log-level", "loud"])
        .assert()
        .failure();
}
