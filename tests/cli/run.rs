//! Tests for `nv run`.

use crate::support::*;

#[cfg(unix)]
#[test]
fn test_run_injects_secrets_and_markers() {
    let t = Test::with_environment("dev", &["-p", "shop", "--set", "TOKEN=abc"]);

    let output = t.run(
        "dev",
        &[],
        &["sh", "-c", "echo $TOKEN $NV_PROJECT $NV_ENVIRONMENT"],
    );
    assert_success(&output);
    assert_stdout_contains(&output, "abc shop dev");
}

#[cfg(unix)]
#[test]
fn test_run_encrypted_with_password() {
    let t = Test::with_environment("dev", &["--set", "TOKEN=abc", "--password", PASSWORD]);

    let output = t.run("dev", &["--password", PASSWORD], &["sh", "-c", "echo $TOKEN"]);
    assert_success(&output);
    assert_stdout_contains(&output, "abc");
}

#[cfg(unix)]
#[test]
fn test_run_password_from_env() {
    let t = Test::with_environment("dev", &["--set", "TOKEN=abc", "--password", PASSWORD]);

    let output = t
        .cmd()
        .env("NV_PASSWORD", PASSWORD)
        .args(["run", "-e", "dev", "--", "sh", "-c", "echo $TOKEN"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "abc");
}

#[cfg(unix)]
#[test]
fn test_run_does_not_pass_password_variable_on() {
    let t = Test::with_environment("dev", &["--set", "TOKEN=abc", "--password", PASSWORD]);

    let output = t
        .cmd()
        .env("NV_PASSWORD", PASSWORD)
        .args(["run", "-e", "dev", "--", "sh", "-c", "echo token=$TOKEN password=[$NV_PASSWORD]"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "token=abc password=[]");
}

#[cfg(unix)]
#[test]
fn test_run_plain_environment_rejects_password() {
    let t = Test::with_environment("dev", &["--set", "TOKEN=abc"]);

    let output = t.run("dev", &["--password", "anything"], &["sh", "-c", "echo $TOKEN"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "no encryption metadata");
}

#[cfg(unix)]
#[test]
fn test_run_encrypted_without_password_fails() {
    let t = Test::with_environment("dev", &["--set", "TOKEN=abc", "--password", PASSWORD]);

    let output = t.run("dev", &[], &["sh", "-c", "echo $TOKEN"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "decrypt");
}

#[cfg(unix)]
#[test]
fn test_run_wrong_password_fails() {
    let t = Test::with_environment("dev", &["--set", "TOKEN=abc", "--password", PASSWORD]);

    let output = t.run("dev", &["--password", "wrong"], &["true"]);
    assert_failure(&output);
}

#[cfg(unix)]
#[test]
fn test_run_exit_code_passthrough() {
    let t = Test::with_environment("", &[]);
    let output = t.run("", &[], &["sh", "-c", "exit 42"]);
    assert_eq!(output.status.code(), Some(42));
}

#[cfg(unix)]
#[test]
fn test_run_toolchain_bin_is_first_on_path() {
    let t = Test::with_environment("dev", &["-p", "shop", "--venv"]);
    let bin = t.home.path().join("envs").join("shop-dev").join("bin");

    let output = t.run("dev", &[], &["sh", "-c", "echo $PATH; echo $VIRTUAL_ENV"]);
    assert_success(&output);
    let out = stdout(&output);
    assert!(
        out.starts_with(&*bin.to_string_lossy()),
        "PATH should start with {}: {}",
        bin.display(),
        out
    );
    assert!(out.contains("shop-dev"));
}

#[test]
fn test_run_unknown_command_fails() {
    let t = Test::with_environment("", &[]);
    let output = t.run("", &[], &["surely-not-a-real-binary"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "surely-not-a-real-binary");
}

#[test]
fn test_run_requires_command() {
    let t = Test::with_environment("", &[]);
    let output = t.cmd().args(["run"]).output().unwrap();
    assert_failure(&output);
}
