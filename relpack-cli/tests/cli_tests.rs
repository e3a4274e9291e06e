//! CLI interface tests.
//!
//! These exercise argument handling only; no network access is made.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn build_without_versions_exits_with_usage_error() {
    Command::cargo_bin("relpack")
        .unwrap()
        .arg("build")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("VERSIONS"));
}

#[test]
fn help_exits_successfully() {
    Command::cargo_bin("relpack")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("latest"))
        .stdout(predicate::str::contains("build"));
}

#[test]
fn version_flag_reports_version() {
    Command::cargo_bin("relpack")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_subcommand_exits_with_usage_error() {
    Command::cargo_bin("relpack")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure()
        .code(2);
}
