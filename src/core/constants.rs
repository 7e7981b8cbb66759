//! Constants used throughout nv.
//!
//! Centralizes file names, variable names and the frozen format parameters.

/// Directory name of the default (unnamed) environment.
pub const DEFAULT_DIR: &str = ".nv";

/// Prefix of named environment directories (`.nv-<name>`).
pub const NAMED_DIR_PREFIX: &str = ".nv-";

/// Plaintext descriptor file inside an environment directory.
pub const DESCRIPTOR_FILE: &str = "nv.json";

/// Secrets file inside an environment directory.
pub const SECRETS_FILE: &str = "environment.json";

/// Encryption memo format version.
pub const MEMO_VERSION: &str = "1";

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes.
pub const KEY_LEN: usize = 32;

/// scrypt cost parameters for memo version "1": N = 2^14, r = 8, p = 1.
///
/// Changing any of these requires a new memo version.
pub const SCRYPT_LOG_N: u8 = 14;
pub const SCRYPT_R: u32 = 8;
pub const SCRYPT_P: u32 = 1;

/// Default keyring service name.
pub const KEYRING_SERVICE: &str = "com.3stack.nv";

/// Identity markers set on every launch.
pub const VAR_PROJECT: &str = "NV_PROJECT";
pub const VAR_PROJECT_DIR: &str = "NV_PROJECT_DIR";
pub const VAR_ENVIRONMENT: &str = "NV_ENVIRONMENT";
pub const VAR_ENVIRONMENT_DIR: &str = "NV_ENVIRONMENT_DIR";

/// Toolchain activation.
pub const VAR_VIRTUAL_ENV: &str = "VIRTUAL_ENV";
pub const VAR_PATH: &str = "PATH";

/// Inherited interpreter-home overrides removed when a toolchain is active.
pub const INTERPRETER_OVERRIDES: &[&str] = &["PYTHONHOME"];

/// AWS credential variables.
pub const VAR_AWS_REGION: &str = "AWS_DEFAULT_REGION";
pub const VAR_AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const VAR_AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const VAR_AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";

/// Shell prompt, decorated when present.
pub const VAR_PS1: &str = "PS1";

/// User shell.
pub const VAR_SHELL: &str = "SHELL";

/// Fallback shell when neither `$SHELL` nor settings name one.
pub const FALLBACK_SHELL: &str = "/bin/sh";

/// Settings file override.
pub const VAR_CONFIG: &str = "NV_CONFIG";

/// Password fallback for `--password`. Never passed on to launched processes.
pub const VAR_PASSWORD: &str = "NV_PASSWORD";

/// Toolchain home override (virtualenvwrapper convention).
pub const VAR_WORKON_HOME: &str = "WORKON_HOME";

/// Default toolchain home relative to HOME.
pub const TOOLCHAIN_HOME_DIR: &str = ".virtualenvs";
