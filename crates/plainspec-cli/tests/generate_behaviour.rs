//! End-to-end coverage for the `plainspec` binary.

#![expect(clippy::expect_used, reason = "tests require descriptive failures")]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::Command;

const LOGIN: &str = "\
Feature: Login

Scenario: Valid login
Given a registered user
When the user logs in
Then the user sees the dashboard

Scenario: Locked account
Given a locked account
";

fn plainspec() -> Command {
    Command::cargo_bin("plainspec").expect("binary should be built")
}

fn write_spec(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("spec file should be written");
    path
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn generate_emits_one_test_per_scenario() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let spec = write_spec(dir.path(), "login.txt", LOGIN);

    let output = plainspec()
        .arg("generate")
        .arg(&spec)
        .output()
        .expect("command should run");
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("login.g.rs: written"));

    let generated =
        fs::read_to_string(dir.path().join("login.g.rs")).expect("fixture should exist");
    assert!(generated.contains("fn valid_login() {"));
    assert!(generated.contains("fn locked_account() {"));
    assert!(generated.contains("\"Valid login\""));
}

#[test]
fn generate_leaves_unchanged_output_alone() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let spec = write_spec(dir.path(), "login.txt", LOGIN);

    plainspec().arg("generate").arg(&spec).assert().success();
    let output = plainspec()
        .arg("generate")
        .arg(&spec)
        .output()
        .expect("command should run");
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("login.g.rs: unchanged"));
}

#[test]
fn scenarios_lists_names() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let spec = write_spec(dir.path(), "login.txt", LOGIN);

    plainspec()
        .arg("scenarios")
        .arg(&spec)
        .assert()
        .success()
        .stdout("Valid login\nLocked account\n");
}

#[test]
fn scenarios_json_is_parseable() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let spec = write_spec(dir.path(), "login.txt", LOGIN);

    let output = plainspec()
        .arg("scenarios")
        .arg(&spec)
        .arg("--json")
        .output()
        .expect("command should run");
    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("output should be JSON");
    let names: Vec<&str> = parsed
        .as_array()
        .expect("output should be an array")
        .iter()
        .filter_map(|entry| entry.get("name").and_then(serde_json::Value::as_str))
        .collect();
    assert_eq!(names, vec!["Valid login", "Locked account"]);
}

#[test]
fn check_reports_errors_and_fails() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let good = write_spec(dir.path(), "good.txt", LOGIN);
    let bad = write_spec(dir.path(), "bad.txt", "Given a step before any scenario\n");

    plainspec().arg("check").arg(&good).assert().success();
    let output = plainspec()
        .arg("check")
        .arg(&good)
        .arg(&bad)
        .output()
        .expect("command should run");
    assert!(!output.status.success());
    assert!(stdout_of(&output).contains("line 1"));
}
