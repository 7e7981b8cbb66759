//! Secret payload encryption.
//!
//! A [`SecretCipher`] is either disabled (the payload is stored as plain
//! JSON) or enabled by a password. An enabled cipher carries an
//! [`EncryptionMemo`] (format version plus salt) which is written to the
//! environment descriptor so the same key can be derived again later.
//!
//! The derived key is never kept: each `encrypt`/`decrypt` call derives it,
//! uses it and drops it (zeroized).

mod aead;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::constants::MEMO_VERSION;
use crate::core::kdf;
use crate::error::{CipherError, Result};

pub use aead::{NONCE_LEN, TAG_LEN};

/// Non-secret metadata needed to re-derive an environment's key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionMemo {
    pub version: String,
    pub salt: String,
}

impl EncryptionMemo {
    fn check_version(&self) -> Result<()> {
        if self.version != MEMO_VERSION {
            return Err(CipherError::UnsupportedVersion(self.version.clone()).into());
        }
        Ok(())
    }
}

/// Password material for an enabled cipher.
pub struct Sealer {
    salt: String,
    password: Zeroizing<String>,
}

impl fmt::Debug for Sealer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sealer")
            .field("salt", &self.salt)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Encryption capability for secret payloads.
#[derive(Debug)]
pub enum SecretCipher {
    /// Pass-through: payloads are stored as plain JSON.
    Disabled,
    /// Authenticated encryption under a password-derived key.
    Enabled(Sealer),
}

impl SecretCipher {
    /// Create an enabled cipher with a freshly generated salt.
    pub fn from_password(password: &str) -> Self {
        debug!("creating cipher with fresh salt");
        SecretCipher::Enabled(Sealer {
            salt: kdf::generate_salt(),
            password: Zeroizing::new(password.to_string()),
        })
    }

    /// Recreate an enabled cipher from a stored memo.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::MissingMemo` if the environment was created
    /// without a password, or `CipherError::UnsupportedVersion` if the memo
    /// was written by an incompatible format.
    pub fn from_memo(memo: Option<&EncryptionMemo>, password: &str) -> Result<Self> {
        let memo = memo.ok_or(CipherError::MissingMemo)?;
        memo.check_version()?;
        Ok(SecretCipher::Enabled(Sealer {
            salt: memo.salt.clone(),
            password: Zeroizing::new(password.to_string()),
        }))
    }

    /// Whether payloads are encrypted.
    pub fn is_enabled(&self) -> bool {
        matches!(self, SecretCipher::Enabled(_))
    }

    /// The memo to persist, `None` when disabled.
    pub fn memo(&self) -> Option<EncryptionMemo> {
        match self {
            SecretCipher::Disabled => None,
            SecretCipher::Enabled(sealer) => Some(EncryptionMemo {
                version: MEMO_VERSION.to_string(),
                salt: sealer.salt.clone(),
            }),
        }
    }

    /// Serialize and (when enabled) encrypt a payload into file contents.
    pub fn encrypt(&self, secrets: &BTreeMap<String, String>) -> Result<String> {
        let json = Zeroizing::new(
            serde_json::to_string_pretty(secrets)
                .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?,
        );

        match self {
            SecretCipher::Disabled => Ok(json.to_string()),
            SecretCipher::Enabled(sealer) => {
                let key = kdf::derive(&sealer.salt, sealer.password.as_bytes())?;
                aead::seal(&key, json.as_bytes())
            }
        }
    }

    /// Verify and decrypt file contents into the JSON text of the payload.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::DecryptionFailed` on a wrong password or
    /// tampered data.
    pub fn decrypt(&self, contents: &str) -> Result<Zeroizing<String>> {
        match self {
            SecretCipher::Disabled => Ok(Zeroizing::new(contents.to_string())),
            SecretCipher::Enabled(sealer) => {
                let key = kdf::derive(&sealer.salt, sealer.password.as_bytes())?;
                let plaintext = aead::open(&key, contents)?;
                let text = std::str::from_utf8(&plaintext).map_err(|e| {
                    CipherError::DecryptionFailed(format!("payload is not UTF-8: {}", e))
                })?;
                Ok(Zeroizing::new(text.to_string()))
            }
        }
    }
}
