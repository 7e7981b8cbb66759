//! Isolated interpreter toolchains.
//!
//! An environment may record the name of a toolchain (a Python virtual
//! environment). Creation is delegated to an external command; activation
//! is plain path injection into the composed environment.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info, warn};

use crate::core::config::Settings;
use crate::core::constants;
use crate::core::outcome::BestEffort;
use crate::error::{LaunchError, Result};

/// Name of the toolchain for an environment: `project` or `project-env`.
pub fn toolchain_name(project_name: &str, environment_name: &str) -> String {
    if environment_name.is_empty() {
        project_name.to_string()
    } else {
        format!("{}-{}", project_name, environment_name)
    }
}

/// A toolchain rooted in the toolchain home.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    name: String,
    root: PathBuf,
}

impl Toolchain {
    pub fn new(name: impl Into<String>, home: &Path) -> Self {
        let name = name.into();
        let root = home.join(&name);
        Self { name, root }
    }

    /// Locate a toolchain by name using the configured home.
    pub fn resolve(name: &str, settings: &Settings) -> Self {
        Self::new(name, &settings.toolchain_home())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The isolation root (`VIRTUAL_ENV`).
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the toolchain's executables.
    pub fn bin_dir(&self) -> PathBuf {
        if cfg!(windows) {
            self.root.join("Scripts")
        } else {
            self.root.join("bin")
        }
    }

    /// Run the creation command with the root appended, from `project_dir`.
    ///
    /// Blocks until the command exits; stdio is inherited.
    ///
    /// # Errors
    ///
    /// Returns `LaunchError::Toolchain` if the command cannot be started or
    /// exits unsuccessfully.
    pub fn provision(&self, command: &[String], project_dir: &Path) -> Result<()> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| LaunchError::Toolchain("empty creation command".to_string()))?;

        info!(
            name = %self.name,
            root = %self.root.display(),
            program = %program,
            "creating toolchain"
        );

        if let Some(parent) = self.root.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let status = Command::new(program)
            .args(args)
            .arg(&self.root)
            .current_dir(project_dir)
            .status()
            .map_err(|e| LaunchError::Toolchain(format!("failed to start {}: {}", program, e)))?;

        if !status.success() {
            return Err(LaunchError::Toolchain(format!("{} exited with {}", program, status)).into());
        }
        Ok(())
    }

    /// Delete the toolchain root. Failure is reported, not raised.
    pub fn teardown(&self) -> BestEffort {
        if !self.root.exists() {
            debug!(root = %self.root.display(), "toolchain already gone");
            return BestEffort::NotApplicable;
        }
        let outcome = BestEffort::from(std::fs::remove_dir_all(&self.root));
        match outcome.reason() {
            Some(reason) => warn!(root = %self.root.display(), reason = %reason, "could not remove toolchain"),
            None => info!(root = %self.root.display(), "toolchain removed"),
        }
        outcome
    }

    /// Activate the toolchain in an environment mapping.
    ///
    /// Removes inherited interpreter-home overrides, sets `VIRTUAL_ENV` and
    /// puts the executable directory in front of `PATH`.
    pub fn activate(&self, env: &mut BTreeMap<String, String>) -> Result<()> {
        for var in constants::INTERPRETER_OVERRIDES {
            env.remove(*var);
        }

        let bin = self.bin_dir();
        let mut entries = vec![bin];
        if let Some(path) = env.get(constants::VAR_PATH) {
            entries.extend(std::env::split_paths(path));
        }
        let joined = std::env::join_paths(entries)
            .map_err(|e| LaunchError::Toolchain(format!("cannot extend PATH: {}", e)))?;

        env.insert(
            constants::VAR_VIRTUAL_ENV.to_string(),
            self.root.to_string_lossy().to_string(),
        );
        env.insert(
            constants::VAR_PATH.to_string(),
            joined.to_string_lossy().to_string(),
        );
        Ok(())
    }
}
