//! Environment lifecycle: create, remove, and edit secrets.
//!
//! These operations sit on top of [`store`] and add the side effects an
//! environment carries with it: the toolchain and the cached password.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::info;
use zeroize::Zeroizing;

use crate::core::cipher::SecretCipher;
use crate::core::config::Settings;
use crate::core::keyring::{self, PasswordCache};
use crate::core::outcome::BestEffort;
use crate::core::store::{self, Descriptor, Environment};
use crate::core::toolchain::{toolchain_name, Toolchain};
use crate::core::validation;
use crate::error::{CipherError, Result, StoreError};

/// Options for [`create`].
#[derive(Clone, Default)]
pub struct CreateOptions {
    /// Environment name; empty for the default environment.
    pub name: String,
    /// Defaults to the project directory's base name.
    pub project_name: Option<String>,
    pub aws_profile: Option<String>,
    pub secrets: BTreeMap<String, String>,
    /// Encrypt secrets with this password.
    pub password: Option<Zeroizing<String>>,
    /// Cache the password in the keyring.
    pub remember: bool,
    /// Provision a toolchain for the environment.
    pub venv: bool,
}

/// Result of [`create`].
#[derive(Debug)]
pub struct Created {
    pub environment: Environment,
    pub descriptor: Descriptor,
    pub toolchain: Option<Toolchain>,
    pub keyring: BestEffort,
}

/// Create an environment.
///
/// The toolchain is provisioned before anything is written, so a failed
/// creation command leaves no environment directory behind.
///
/// # Errors
///
/// - `ValidationError` for a bad name or secret key
/// - `StoreError::AlreadyExists` if the environment directory exists
/// - `LaunchError::Toolchain` if provisioning fails
pub fn create(
    project_dir: &Path,
    options: CreateOptions,
    cache: &dyn PasswordCache,
    settings: &Settings,
) -> Result<Created> {
    let environment = Environment::locate(project_dir, &options.name)?;
    if environment.exists() {
        return Err(StoreError::AlreadyExists(environment.dir().to_path_buf()).into());
    }
    for key in options.secrets.keys() {
        validation::validate_key(key)?;
    }

    let project_name = match options.project_name {
        Some(name) => name,
        None => default_project_name(environment.project_dir()),
    };

    let cipher = match &options.password {
        Some(password) => SecretCipher::from_password(password),
        None => SecretCipher::Disabled,
    };

    let toolchain = if options.venv {
        let toolchain = Toolchain::resolve(&toolchain_name(&project_name, &options.name), settings);
        toolchain.provision(&settings.toolchain.command, environment.project_dir())?;
        Some(toolchain)
    } else {
        None
    };

    let descriptor = Descriptor {
        project_name,
        environment_name: options.name,
        aws_profile: options.aws_profile,
        encryption: cipher.memo(),
        venv: toolchain.as_ref().map(|t| t.name().to_string()),
    };

    let environment = store::create_dir(&environment, &descriptor)?;
    let keyring = match &options.password {
        Some(password) if options.remember => {
            keyring::remember(cache, &environment.keyring_identity(), password)
        }
        _ => BestEffort::NotApplicable,
    };
    if !options.secrets.is_empty() {
        store::save_secrets(&environment, &cipher, &options.secrets)?;
    }

    info!(
        dir = %environment.dir().display(),
        encrypted = cipher.is_enabled(),
        secrets = options.secrets.len(),
        "environment created"
    );

    Ok(Created {
        environment,
        descriptor,
        toolchain,
        keyring,
    })
}

fn default_project_name(project_dir: &Path) -> String {
    project_dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "project".to_string())
}

/// Result of [`remove`].
#[derive(Debug)]
pub struct Removed {
    pub environment: Environment,
    pub toolchain: BestEffort,
    pub keyring: BestEffort,
}

/// Remove an environment, its toolchain and its cached password.
///
/// Toolchain teardown and keyring cleanup never abort the removal.
pub fn remove(
    project_dir: &Path,
    name: &str,
    cache: &dyn PasswordCache,
    settings: &Settings,
) -> Result<Removed> {
    let (environment, descriptor) = store::load(project_dir, name)?;

    let toolchain = match descriptor.venv.as_deref() {
        Some(venv) => Toolchain::resolve(venv, settings).teardown(),
        None => BestEffort::NotApplicable,
    };
    let keyring = keyring::forget(cache, &environment.keyring_identity());

    store::remove_dir(&environment)?;

    Ok(Removed {
        environment,
        toolchain,
        keyring,
    })
}

/// An environment opened for editing its secrets.
pub struct Unlocked {
    pub environment: Environment,
    pub descriptor: Descriptor,
    pub secrets: BTreeMap<String, String>,
    cipher: SecretCipher,
}

impl std::fmt::Debug for Unlocked {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unlocked")
            .field("environment", &self.environment)
            .field("keys", &self.secrets.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Open an environment's secrets.
///
/// An explicit password wins over a cached one. An explicit password for an
/// unencrypted environment is a format error (`CipherError::MissingMemo`).
///
/// # Errors
///
/// Returns `CipherError::DecryptionFailed` if the environment is encrypted
/// and no working password is available.
pub fn unlock(
    project_dir: &Path,
    name: &str,
    password: Option<Zeroizing<String>>,
    cache: &dyn PasswordCache,
) -> Result<Unlocked> {
    let (environment, descriptor) = store::load(project_dir, name)?;

    let cipher = match password {
        Some(password) => SecretCipher::from_memo(descriptor.encryption.as_ref(), &password)?,
        None if descriptor.is_encrypted() => {
            let password = keyring::recall(cache, &environment.keyring_identity()).ok_or_else(|| {
                CipherError::DecryptionFailed("environment is encrypted; a password is required".to_string())
            })?;
            SecretCipher::from_memo(descriptor.encryption.as_ref(), &password)?
        }
        None => SecretCipher::Disabled,
    };

    let secrets = store::load_secrets(&environment, &cipher)?.unwrap_or_default();

    Ok(Unlocked {
        environment,
        descriptor,
        secrets,
        cipher,
    })
}

impl Unlocked {
    /// Set a secret, validating its key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validation::validate_key(key)?;
        self.secrets.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Remove a secret. Returns whether it existed.
    pub fn unset(&mut self, key: &str) -> bool {
        self.secrets.remove(key).is_some()
    }

    /// Write the secrets back with the environment's cipher.
    pub fn save(&self) -> Result<()> {
        store::save_secrets(&self.environment, &self.cipher, &self.secrets)
    }
}

/// Cache a password for an environment after checking that it works.
///
/// # Errors
///
/// Fails if the password cannot open the secrets, or if the keyring
/// rejects the write.
pub fn store_password(
    project_dir: &Path,
    name: &str,
    password: &str,
    cache: &dyn PasswordCache,
) -> Result<Environment> {
    let unlocked = unlock(project_dir, name, Some(Zeroizing::new(password.to_string())), cache)?;
    cache.store(&unlocked.environment.keyring_identity(), password)?;
    Ok(unlocked.environment)
}

/// Remove the cached password of an environment.
pub fn forget_password(project_dir: &Path, name: &str, cache: &dyn PasswordCache) -> Result<Environment> {
    let (environment, _) = store::load(project_dir, name)?;
    cache.forget(&environment.keyring_identity())?;
    Ok(environment)
}
