//! Tests for `nv create` and `nv rm`.

use crate::support::*;

#[test]
fn test_create_default_environment() {
    let t = Test::new();
    let output = t.create("", &["--set", "X=1"]);
    assert_success(&output);
    assert_stdout_contains(&output, "created");

    let descriptor = read_json(&t.env_dir("").join("nv.json"));
    assert_eq!(descriptor["environment_name"], "");
    assert!(descriptor["encryption"].is_null());
    assert!(descriptor["aws_profile"].is_null());

    let secrets = read_json(&t.env_dir("").join("environment.json"));
    assert_eq!(secrets, serde_json::json!({"X": "1"}));
}

#[test]
fn test_create_project_name_defaults_to_directory() {
    let t = Test::new();
    assert_success(&t.create("dev", &[]));

    let descriptor = read_json(&t.env_dir("dev").join("nv.json"));
    let expected = t
        .dir
        .path()
        .canonicalize()
        .unwrap()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .to_string();
    assert_eq!(descriptor["project_name"], expected.as_str());
}

#[test]
fn test_create_encrypted() {
    let t = Test::new();
    let output = t.create(
        "staging",
        &["-p", "shop", "--set", "TOKEN=abc", "--password", PASSWORD],
    );
    assert_success(&output);

    let descriptor = read_json(&t.env_dir("staging").join("nv.json"));
    assert_eq!(descriptor["project_name"], "shop");
    assert_eq!(descriptor["encryption"]["version"], "1");
    assert!(descriptor["encryption"]["salt"].is_string());

    let raw = std::fs::read_to_string(t.env_dir("staging").join("environment.json")).unwrap();
    assert!(serde_json::from_str::<serde_json::Value>(&raw).is_err());
    assert!(!raw.contains("abc"));
}

#[test]
fn test_create_twice_fails() {
    let t = Test::with_environment("dev", &[]);
    let output = t.create("dev", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "already exists");
}

#[test]
fn test_create_with_venv_records_toolchain() {
    let t = Test::new();
    assert_success(&t.create("dev", &["-p", "shop", "--venv"]));

    let descriptor = read_json(&t.env_dir("dev").join("nv.json"));
    assert_eq!(descriptor["venv"], "shop-dev");
    assert!(t.home.path().join("envs").join("shop-dev").is_dir());
}

#[test]
fn test_create_rejects_bad_assignment() {
    let t = Test::new();
    assert_failure(&t.create("dev", &["--set", "NOEQUALS"]));
    assert!(!t.env_dir("dev").exists());
}

#[test]
fn test_remember_without_keyring_still_creates() {
    let t = Test::new();
    let output = t.create("dev", &["--password", PASSWORD, "--remember"]);
    assert_success(&output);
    assert_stderr_contains(&output, "password not cached");
}

#[test]
fn test_rm_removes_environment_and_toolchain() {
    let t = Test::with_environment("dev", &["-p", "shop", "--venv"]);
    let toolchain = t.home.path().join("envs").join("shop-dev");
    assert!(toolchain.is_dir());

    let output = t.rm("dev");
    assert_success(&output);
    assert!(!t.env_dir("dev").exists());
    assert!(!toolchain.exists());
}

#[test]
fn test_rm_missing_environment_fails() {
    let t = Test::new();
    let output = t.rm("dev");
    assert_failure(&output);
    assert_stderr_contains(&output, "nv create");
}
