//! Tests for `nv secrets` and `nv keyring`.

use crate::support::*;

#[test]
fn test_list_shows_names_not_values() {
    let t = Test::with_environment("dev", &["--set", "B=2", "--set", "A=1"]);
    let output = t.secrets("list", &[], "dev", &[]);
    assert_success(&output);
    assert_eq!(stdout(&output), "A\nB\n");
}

#[test]
fn test_list_empty() {
    let t = Test::with_environment("dev", &[]);
    let output = t.secrets("list", &[], "dev", &[]);
    assert_success(&output);
    assert_stdout_contains(&output, "no secrets stored");
}

#[test]
fn test_set_and_unset_plain() {
    let t = Test::with_environment("dev", &["--set", "A=1"]);

    assert_success(&t.secrets("set", &["B=2", "C=x=y"], "dev", &[]));
    let secrets = read_json(&t.env_dir("dev").join("environment.json"));
    assert_eq!(secrets, serde_json::json!({"A": "1", "B": "2", "C": "x=y"}));

    let output = t.secrets("unset", &["A", "MISSING"], "dev", &[]);
    assert_success(&output);
    assert_stderr_contains(&output, "MISSING is not set");
    let secrets = read_json(&t.env_dir("dev").join("environment.json"));
    assert_eq!(secrets, serde_json::json!({"B": "2", "C": "x=y"}));
}

#[test]
fn test_set_encrypted_keeps_encryption() {
    let t = Test::with_environment("dev", &["--set", "A=1", "--password", PASSWORD]);

    assert_success(&t.secrets("set", &["B=2"], "dev", &["--password", PASSWORD]));

    let raw = std::fs::read_to_string(t.env_dir("dev").join("environment.json")).unwrap();
    assert!(serde_json::from_str::<serde_json::Value>(&raw).is_err());

    let output = t.secrets("list", &[], "dev", &["--password", PASSWORD]);
    assert_success(&output);
    assert_eq!(stdout(&output), "A\nB\n");
}

#[test]
fn test_set_encrypted_without_password_fails() {
    let t = Test::with_environment("dev", &["--set", "A=1", "--password", PASSWORD]);
    let output = t.secrets("set", &["B=2"], "dev", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "decryption failed");
}

#[test]
fn test_set_rejects_invalid_key() {
    let t = Test::with_environment("dev", &[]);
    let output = t.secrets("set", &["1BAD=x"], "dev", &[]);
    assert_failure(&output);
    assert!(!t.env_dir("dev").join("environment.json").exists());
}

#[test]
fn test_keyring_store_fails_when_disabled() {
    let t = Test::with_environment("dev", &["--set", "A=1", "--password", PASSWORD]);
    let output = t
        .cmd()
        .args(["keyring", "store", "dev", "--password", PASSWORD])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "keyring is disabled");
}

#[test]
fn test_keyring_forget_without_entry_succeeds() {
    let t = Test::with_environment("dev", &[]);
    let output = t.cmd().args(["keyring", "forget", "dev"]).output().unwrap();
    assert_success(&output);
}
