//! Cached environment passwords.
//!
//! Passwords are filed in the platform secret store (macOS Keychain,
//! Windows Credential Manager, Linux kernel keyutils) under the configured
//! service, keyed by the environment directory's absolute path. Moving the
//! project therefore invalidates the cache, which only costs a prompt.
//!
//! The cache is best-effort. [`remember`], [`recall`] and [`forget`] never
//! fail: lookups degrade to "no password" and writes report a
//! [`BestEffort`]. The [`PasswordCache`] methods themselves do return errors
//! for the explicit `nv keyring` commands.

use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::core::config::KeyringSettings;
use crate::core::outcome::BestEffort;
use crate::error::{KeyringError, Result};

/// Storage for environment passwords.
pub trait PasswordCache {
    /// Store a password for an identity, replacing any previous one.
    fn store(&self, identity: &str, password: &str) -> Result<()>;

    /// Look up the password for an identity.
    fn retrieve(&self, identity: &str) -> Result<Option<Zeroizing<String>>>;

    /// Remove the password for an identity. A missing entry is not an error.
    fn forget(&self, identity: &str) -> Result<()>;
}

/// Platform secret store backend.
#[derive(Debug, Clone)]
pub struct Keyring {
    service: String,
}

impl Keyring {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, identity: &str) -> Result<::keyring::Entry> {
        ::keyring::Entry::new(&self.service, identity)
            .map_err(|e| KeyringError::Unavailable(e.to_string()).into())
    }
}

impl PasswordCache for Keyring {
    fn store(&self, identity: &str, password: &str) -> Result<()> {
        debug!(identity = %identity, service = %self.service, "storing password");
        self.entry(identity)?
            .set_password(password)
            .map_err(|e| KeyringError::Unavailable(e.to_string()))?;
        info!(identity = %identity, "password cached");
        Ok(())
    }

    fn retrieve(&self, identity: &str) -> Result<Option<Zeroizing<String>>> {
        match self.entry(identity)?.get_password() {
            Ok(password) => Ok(Some(Zeroizing::new(password))),
            Err(::keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(KeyringError::Unavailable(e.to_string()).into()),
        }
    }

    fn forget(&self, identity: &str) -> Result<()> {
        match self.entry(identity)?.delete_credential() {
            Ok(()) | Err(::keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(KeyringError::Unavailable(e.to_string()).into()),
        }
    }
}

/// Backend used when caching is disabled in settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Disabled;

impl PasswordCache for Disabled {
    fn store(&self, _identity: &str, _password: &str) -> Result<()> {
        Err(KeyringError::Disabled.into())
    }

    fn retrieve(&self, _identity: &str) -> Result<Option<Zeroizing<String>>> {
        Ok(None)
    }

    fn forget(&self, _identity: &str) -> Result<()> {
        Ok(())
    }
}

/// Build the cache backend described by settings.
pub fn from_settings(settings: &KeyringSettings) -> Box<dyn PasswordCache> {
    if settings.enabled {
        Box::new(Keyring::new(settings.service.clone()))
    } else {
        debug!("keyring disabled by settings");
        Box::new(Disabled)
    }
}

/// Store a password, logging instead of failing.
pub fn remember(cache: &dyn PasswordCache, identity: &str, password: &str) -> BestEffort {
    let outcome = BestEffort::from(cache.store(identity, password));
    if let Some(reason) = outcome.reason() {
        warn!(identity = %identity, reason = %reason, "could not cache password");
    }
    outcome
}

/// Look up a password; any failure reads as "none cached".
pub fn recall(cache: &dyn PasswordCache, identity: &str) -> Option<Zeroizing<String>> {
    match cache.retrieve(identity) {
        Ok(found) => {
            debug!(identity = %identity, found = found.is_some(), "keyring lookup");
            found
        }
        Err(e) => {
            debug!(identity = %identity, error = %e, "keyring lookup failed");
            None
        }
    }
}

/// Remove a cached password, logging instead of failing.
pub fn forget(cache: &dyn PasswordCache, identity: &str) -> BestEffort {
    let outcome = BestEffort::from(cache.forget(identity));
    if let Some(reason) = outcome.reason() {
        warn!(identity = %identity, reason = %reason, "could not remove cached password");
    }
    outcome
}
