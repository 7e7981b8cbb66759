//! User settings.
//!
//! Reads the optional `config.toml` from `$NV_CONFIG` or the platform config
//! directory (`~/.config/nv/config.toml` on Linux). Every field has a
//! default, so a missing file is the same as an empty one.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// User settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fallback shell when `$SHELL` is unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
    pub keyring: KeyringSettings,
    pub toolchain: ToolchainSettings,
}

/// Password caching settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyringSettings {
    /// Whether cached passwords are stored and looked up at all.
    pub enabled: bool,
    /// Service name entries are filed under.
    pub service: String,
}

impl Default for KeyringSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            service: constants::KEYRING_SERVICE.to_string(),
        }
    }
}

/// Toolchain provisioning settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainSettings {
    /// Creation command; the toolchain root is appended as the last argument.
    pub command: Vec<String>,
    /// Directory holding toolchains. Defaults to `$WORKON_HOME` or `~/.virtualenvs`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home: Option<PathBuf>,
}

impl Default for ToolchainSettings {
    fn default() -> Self {
        Self {
            command: vec!["python3".to_string(), "-m".to_string(), "venv".to_string()],
            home: None,
        }
    }
}

impl Settings {
    /// Path of the settings file.
    pub fn path() -> Option<PathBuf> {
        if let Some(explicit) = std::env::var_os(constants::VAR_CONFIG) {
            return Some(PathBuf::from(explicit));
        }
        dirs::config_dir().map(|dir| dir.join("nv").join("config.toml"))
    }

    /// Load settings from the default location.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read, parsed
    /// or validated.
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load settings from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        debug!(path = %path.display(), "loading settings");
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let settings: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate field contents.
    pub fn validate(&self) -> Result<()> {
        if self.keyring.service.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "keyring.service",
                reason: "cannot be empty".to_string(),
            }
            .into());
        }
        if self.toolchain.command.is_empty() || self.toolchain.command[0].trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "toolchain.command",
                reason: "needs at least a program name".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Directory holding toolchains.
    pub fn toolchain_home(&self) -> PathBuf {
        if let Some(home) = &self.toolchain.home {
            return home.clone();
        }
        if let Some(workon) = std::env::var_os(constants::VAR_WORKON_HOME) {
            return PathBuf::from(workon);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(constants::TOOLCHAIN_HOME_DIR)
    }
}
