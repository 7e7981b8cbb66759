//! AES-256-GCM sealing of secret payloads.
//!
//! The sealed form is a single line of URL-safe base64 over
//! `nonce (12 bytes) || ciphertext || tag (16 bytes)`.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::trace;
use zeroize::Zeroizing;

use crate::core::constants::KEY_LEN;
use crate::error::{CipherError, Result};

/// Size of the AES-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the AES-GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext` under `key` with a fresh random nonce.
pub fn seal(key: &[u8; KEY_LEN], plaintext: &[u8]) -> Result<String> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

    let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);

    trace!(
        plaintext_len = plaintext.len(),
        blob_len = blob.len(),
        "sealed"
    );
    Ok(URL_SAFE.encode(blob))
}

/// Verify and decrypt a sealed blob.
///
/// Any failure here, including a truncated or non-base64 blob, is reported
/// as a decryption failure: without the key a corrupt file and a wrong
/// password are indistinguishable.
pub fn open(key: &[u8; KEY_LEN], sealed: &str) -> Result<Zeroizing<Vec<u8>>> {
    let blob = URL_SAFE
        .decode(sealed.trim())
        .map_err(|e| CipherError::DecryptionFailed(format!("invalid encoding: {}", e)))?;

    if blob.len() < NONCE_LEN + TAG_LEN {
        return Err(CipherError::DecryptionFailed("ciphertext too short".to_string()).into());
    }

    let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| {
            CipherError::DecryptionFailed("wrong password or tampered data".to_string())
        })?;

    trace!(plaintext_len = plaintext.len(), "opened");
    Ok(Zeroizing::new(plaintext))
}
