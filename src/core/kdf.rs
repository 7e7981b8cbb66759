//! Password-based key derivation.
//!
//! scrypt with the cost parameters frozen in [`constants`]. Salts are stored
//! as URL-safe base64 text in the environment descriptor.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::trace;
use zeroize::Zeroizing;

use crate::core::constants::{self, KEY_LEN, SALT_LEN};
use crate::error::{CipherError, Result};

/// A derived symmetric key. Wiped on drop.
pub type DerivedKey = Zeroizing<[u8; KEY_LEN]>;

/// Generate a fresh random salt, encoded for storage.
pub fn generate_salt() -> String {
    generate_salt_of(SALT_LEN)
}

/// Generate `n` random salt bytes, encoded for storage.
pub fn generate_salt_of(n: usize) -> String {
    let mut salt = vec![0u8; n];
    OsRng.fill_bytes(&mut salt);
    URL_SAFE.encode(salt)
}

/// Derive a key from an encoded salt and a password.
///
/// Deterministic: the same salt and password always give the same key.
///
/// # Errors
///
/// Returns `CipherError::InvalidSalt` if the salt is not valid base64.
pub fn derive(salt: &str, password: &[u8]) -> Result<DerivedKey> {
    let salt_bytes = URL_SAFE
        .decode(salt.trim())
        .map_err(|e| CipherError::InvalidSalt(e.to_string()))?;

    let params = scrypt::Params::new(
        constants::SCRYPT_LOG_N,
        constants::SCRYPT_R,
        constants::SCRYPT_P,
        KEY_LEN,
    )
    .map_err(|e| CipherError::KeyDerivation(e.to_string()))?;

    trace!(salt_len = salt_bytes.len(), "deriving key");

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    scrypt::scrypt(password, &salt_bytes, &params, key.as_mut())
        .map_err(|e| CipherError::KeyDerivation(e.to_string()))?;

    Ok(key)
}
