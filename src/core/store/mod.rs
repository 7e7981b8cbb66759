//! Environment storage.
//!
//! Each environment lives in its own directory under the project:
//! `.nv` for the default environment, `.nv-<name>` otherwise. The directory
//! holds the plaintext [`Descriptor`] (`nv.json`) and, when secrets were
//! declared, the secrets file (`environment.json`) which is either plain
//! JSON or a sealed blob depending on the cipher.

mod descriptor;
mod fs;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::cipher::SecretCipher;
use crate::core::constants;
use crate::core::validation;
use crate::error::{CipherError, Result, StoreError};

pub use descriptor::Descriptor;

/// Directory name for an environment.
pub fn folder_name(environment_name: &str) -> String {
    if environment_name.is_empty() {
        constants::DEFAULT_DIR.to_string()
    } else {
        format!("{}{}", constants::NAMED_DIR_PREFIX, environment_name)
    }
}

/// Handle on an environment directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    project_dir: PathBuf,
    dir: PathBuf,
    encrypted: bool,
}

impl Environment {
    /// Resolve the directory of an environment without touching it.
    ///
    /// The name is validated first, then the project directory is made
    /// absolute and canonical so the directory path can serve as a stable
    /// keyring identity.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidName` for a rejected name, or
    /// `StoreError::NotFound` if the project directory does not exist.
    pub fn locate(project_dir: &Path, environment_name: &str) -> Result<Self> {
        validation::validate_environment_name(environment_name)?;

        let project_dir = project_dir
            .canonicalize()
            .map_err(|_| StoreError::NotFound(project_dir.to_path_buf()))?;
        let dir = project_dir.join(folder_name(environment_name));

        Ok(Self {
            project_dir,
            dir,
            encrypted: false,
        })
    }

    /// The environment directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The project directory (parent of the environment directory).
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Path of `nv.json`.
    pub fn descriptor_path(&self) -> PathBuf {
        self.dir.join(constants::DESCRIPTOR_FILE)
    }

    /// Path of `environment.json`.
    pub fn secrets_path(&self) -> PathBuf {
        self.dir.join(constants::SECRETS_FILE)
    }

    /// Whether the directory exists.
    pub fn exists(&self) -> bool {
        self.dir.exists()
    }

    /// Whether a secrets file is present.
    pub fn has_secrets(&self) -> bool {
        self.secrets_path().exists()
    }

    /// Whether the descriptor records an encryption memo.
    pub fn is_encrypted(&self) -> bool {
        self.encrypted
    }

    /// Identity under which a password for this environment is cached.
    pub fn keyring_identity(&self) -> String {
        self.dir.to_string_lossy().to_string()
    }

    pub(crate) fn with_descriptor(mut self, descriptor: &Descriptor) -> Self {
        self.encrypted = descriptor.is_encrypted();
        self
    }
}

/// Load an existing environment and its descriptor.
///
/// # Errors
///
/// - `ValidationError::InvalidName` before any filesystem access
/// - `StoreError::NotFound` if the directory or `nv.json` is missing
/// - `StoreError::Parse` if `nv.json` is malformed
/// - `StoreError::NameMismatch` if `nv.json` names another environment
pub fn load(project_dir: &Path, environment_name: &str) -> Result<(Environment, Descriptor)> {
    let environment = Environment::locate(project_dir, environment_name)?;
    let path = environment.descriptor_path();
    debug!(path = %path.display(), "loading descriptor");

    if !environment.exists() || !path.exists() {
        return Err(StoreError::NotFound(environment.dir().to_path_buf()).into());
    }

    let contents = fs::read(&path)?;
    let descriptor: Descriptor =
        serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
            path: path.clone(),
            source,
        })?;

    if descriptor.environment_name != environment_name {
        return Err(StoreError::NameMismatch {
            path,
            expected: environment_name.to_string(),
            found: descriptor.environment_name,
        }
        .into());
    }

    debug!(
        project = %descriptor.project_name,
        encrypted = descriptor.is_encrypted(),
        venv = descriptor.venv.is_some(),
        aws = descriptor.aws_profile.is_some(),
        "descriptor loaded"
    );

    Ok((environment.with_descriptor(&descriptor), descriptor))
}

/// Write `nv.json`.
pub fn save_descriptor(environment: &Environment, descriptor: &Descriptor) -> Result<()> {
    let json = serde_json::to_string_pretty(descriptor).map_err(|source| StoreError::Parse {
        path: environment.descriptor_path(),
        source,
    })?;
    fs::write_atomic(&environment.descriptor_path(), json.as_bytes())
}

/// Create the environment directory and write its descriptor.
///
/// # Errors
///
/// Returns `StoreError::AlreadyExists` if the directory is present.
pub fn create_dir(environment: &Environment, descriptor: &Descriptor) -> Result<Environment> {
    if environment.exists() {
        return Err(StoreError::AlreadyExists(environment.dir().to_path_buf()).into());
    }

    std::fs::create_dir(environment.dir()).map_err(|source| StoreError::WriteFailed {
        path: environment.dir().to_path_buf(),
        source,
    })?;
    let environment = environment.clone().with_descriptor(descriptor);
    save_descriptor(&environment, descriptor)?;

    info!(dir = %environment.dir().display(), "environment directory created");
    Ok(environment)
}

/// Delete the environment directory and everything in it.
pub fn remove_dir(environment: &Environment) -> Result<()> {
    std::fs::remove_dir_all(environment.dir()).map_err(|source| StoreError::WriteFailed {
        path: environment.dir().to_path_buf(),
        source,
    })?;
    info!(dir = %environment.dir().display(), "environment directory removed");
    Ok(())
}

/// Load the secrets of an environment.
///
/// Returns `None` when no secrets file exists.
///
/// # Errors
///
/// - `CipherError::DecryptionFailed` on a wrong password, tampered data, or
///   an encrypted environment opened without a password
/// - `StoreError::Parse` / `ValidationError` if the payload is not a
///   mapping of text values
pub fn load_secrets(
    environment: &Environment,
    cipher: &SecretCipher,
) -> Result<Option<BTreeMap<String, String>>> {
    let path = environment.secrets_path();
    if !path.exists() {
        debug!("no secrets file");
        return Ok(None);
    }

    ensure_cipher_matches(environment, cipher)?;

    let contents = fs::read(&path)?;
    let plaintext = cipher.decrypt(&contents)?;
    let value: serde_json::Value =
        serde_json::from_str(&plaintext).map_err(|source| StoreError::Parse {
            path: path.clone(),
            source,
        })?;
    let secrets = validation::validate_payload(value)?;

    debug!(count = secrets.len(), "secrets loaded");
    Ok(Some(secrets))
}

/// Replace the secrets of an environment.
///
/// Keys are not validated here; every value is text by construction.
pub fn save_secrets(
    environment: &Environment,
    cipher: &SecretCipher,
    secrets: &BTreeMap<String, String>,
) -> Result<()> {
    ensure_cipher_matches(environment, cipher)?;

    let contents = cipher.encrypt(secrets)?;
    fs::write_atomic(&environment.secrets_path(), contents.as_bytes())?;

    debug!(
        count = secrets.len(),
        encrypted = cipher.is_enabled(),
        "secrets saved"
    );
    Ok(())
}

fn ensure_cipher_matches(environment: &Environment, cipher: &SecretCipher) -> Result<()> {
    if environment.is_encrypted() && !cipher.is_enabled() {
        return Err(CipherError::DecryptionFailed(
            "environment is encrypted and no password is available".to_string(),
        )
        .into());
    }
    Ok(())
}
