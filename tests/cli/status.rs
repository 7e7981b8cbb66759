//! Tests for `nv status` and `nv completions`.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_status_plain() {
    let t = Test::with_environment("dev", &["-p", "shop", "--set", "A=1"]);
    let output = t.status("dev");
    assert_success(&output);
    assert_stdout_contains(&output, "shop:dev");
    assert_stdout_contains(&output, "plain");
}

#[test]
fn test_status_never_needs_a_password() {
    let t = Test::with_environment(
        "",
        &["-p", "shop", "--aws-profile", "prod", "--set", "A=1", "--password", PASSWORD],
    );
    let output = t.status("");
    assert_success(&output);
    assert_stdout_contains(&output, "encrypted");
    assert_stdout_contains(&output, "prod");
    assert_stdout_contains(&output, "(default)");
}

#[test]
fn test_status_with_missing_toolchain() {
    let t = Test::with_environment("dev", &["-p", "shop", "--venv"]);
    std::fs::remove_dir_all(t.home.path().join("envs").join("shop-dev")).unwrap();
    let output = t.status("dev");
    assert_success(&output);
    assert_stdout_contains(&output, "(missing)");
}

#[test]
fn test_completions() {
    let t = Test::new();
    t.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nv"))
        .stdout(predicate::str::contains("create"));
}

#[test]
fn test_completions_need_no_settings() {
    let t = Test::new();
    t.write_config("not = [valid");
    t.cmd().args(["completions", "zsh"]).assert().success();
}
