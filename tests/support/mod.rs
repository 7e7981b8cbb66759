//! Test support utilities for nv integration tests.
//!
//! Provides isolated project and home directories plus command shortcuts.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own project dir, home dir and settings file. The
/// settings disable the system keyring and point toolchains into the home
/// dir. No process-global state is mutated; child processes get everything
/// through their environment and `.current_dir()`.
pub struct Test {
    /// Temporary project directory
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Create a new test environment with no nv environments in it.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");
        let t = Self { dir, home };
        t.write_config(DEFAULT_CONFIG);
        t
    }

    /// Create a test environment with one environment already created.
    pub fn with_environment(name: &str, args: &[&str]) -> Self {
        let t = Self::new();
        let output = t.create(name, args);
        assert!(
            output.status.success(),
            "Failed to create environment: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        t
    }

    /// Path of the settings file passed through `NV_CONFIG`.
    pub fn config_path(&self) -> PathBuf {
        self.home.path().join("nv-config.toml")
    }

    /// Replace the settings file.
    pub fn write_config(&self, contents: &str) {
        let contents = contents.replace("{home}", &self.home.path().to_string_lossy());
        std::fs::write(self.config_path(), contents).expect("failed to write config");
    }

    /// Directory of a named environment.
    pub fn env_dir(&self, name: &str) -> PathBuf {
        if name.is_empty() {
            self.dir.path().join(".nv")
        } else {
            self.dir.path().join(format!(".nv-{}", name))
        }
    }
}
