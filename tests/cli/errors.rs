//! Error reporting tests.

use crate::support::*;

#[test]
fn test_invalid_names_rejected_before_touching_disk() {
    let t = Test::new();
    for name in INVALID_NAMES {
        let output = t
            .cmd()
            .args(["create", "--", name])
            .output()
            .unwrap();
        assert_failure(&output);
    }
    let entries: Vec<_> = std::fs::read_dir(t.dir.path()).unwrap().collect();
    assert!(entries.is_empty(), "nothing should be created");
}

#[test]
fn test_valid_names_accepted() {
    let t = Test::new();
    for name in VALID_NAMES {
        assert_success(&t.create(name, &[]));
        assert!(t.env_dir(name).join("nv.json").exists());
    }
}

#[test]
fn test_traversal_name_reports_invalid_name() {
    let t = Test::new();
    let output = t.status("../etc");
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid environment name");
}

#[test]
fn test_missing_environment_hint() {
    let t = Test::new();
    let output = t.status("");
    assert_failure(&output);
    assert_stderr_contains(&output, "environment not found");
    assert_stderr_contains(&output, "run: nv create");
}

#[test]
fn test_malformed_descriptor() {
    let t = Test::new();
    std::fs::create_dir(t.env_dir("dev")).unwrap();
    std::fs::write(t.env_dir("dev").join("nv.json"), "{ not json").unwrap();
    let output = t.status("dev");
    assert_failure(&output);
    assert_stderr_contains(&output, "malformed JSON");
}

#[test]
fn test_non_text_secret_rejected() {
    let t = Test::with_environment("dev", &[]);
    std::fs::write(
        t.env_dir("dev").join("environment.json"),
        r#"{"PORT": 8080}"#,
    )
    .unwrap();
    let output = t.run("dev", &[], &["true"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "expected text");
}

#[test]
fn test_bad_settings_file() {
    let t = Test::new();
    t.write_config("[keyring]\nservice = \"\"\n");
    let output = t.create("dev", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "keyring.service");
}

#[test]
fn test_password_conflicts_with_prompt() {
    let t = Test::new();
    let output = t.create("dev", &["--password", "x", "--ask-password"]);
    assert_failure(&output);
}
