//! Test fixtures and constants.

/// Settings used by every test: no system keyring, toolchains in the
/// temporary home, and a creation command that only makes the directory.
pub const DEFAULT_CONFIG: &str = r#"
shell = "/bin/sh"

[keyring]
enabled = false

[toolchain]
command = ["mkdir", "-p"]
home = '{home}/envs'
"#;

/// Password used by encrypted fixtures.
pub const PASSWORD: &str = "hunter2";

/// A valid secret pair.
pub const TOKEN: (&str, &str) = ("TOKEN", "abc");

/// Environment names the validator accepts.
pub const VALID_NAMES: &[&str] = &["dev", "my-env2", "staging"];

/// Environment names the validator rejects.
pub const INVALID_NAMES: &[&str] = &["Dev", "-dev", "dev_1", "../etc"];
