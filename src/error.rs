//! Error types for nv.
//!
//! Errors are grouped by concern and wrapped by the top-level [`Error`].
//! [`Error::kind`] collapses them onto the coarse taxonomy callers branch on,
//! so "bad password" and "corrupt file" stay distinguishable.

use std::path::PathBuf;

use thiserror::Error;

/// Environment storage errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("environment not found: '{}'", .0.display())]
    NotFound(PathBuf),

    #[error("environment already exists at '{}'", .0.display())]
    AlreadyExists(PathBuf),

    #[error("failed to read '{}': {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{}': {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("'{}' names environment '{found}', expected '{expected}'", path.display())]
    NameMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },
}

/// Input and data-shape validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("invalid environment name '{0}': use lowercase letters, digits and single dashes, starting with a letter")]
    InvalidName(String),

    #[error("secrets: expected a mapping, got {0}")]
    NotMapping(&'static str),

    #[error("secret '{key}': expected text, got {found}")]
    NotText { key: String, found: &'static str },

    #[error("invalid secret key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("invalid assignment '{0}': expected KEY=VALUE")]
    InvalidAssignment(String),
}

/// Key derivation and encryption errors.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("no encryption metadata found")]
    MissingMemo,

    #[error("unsupported encryption version: {0:?}")]
    UnsupportedVersion(String),

    #[error("invalid salt: {0}")]
    InvalidSalt(String),

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),
}

/// Process hand-off errors.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("executable not found: {0}")]
    ExecutableNotFound(String),

    #[error("no command specified")]
    NoCommand,

    #[error("failed to execute '{}': {source}", program.display())]
    ExecFailed {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("toolchain creation failed: {0}")]
    Toolchain(String),
}

/// Cloud credential resolution errors.
#[derive(Error, Debug)]
pub enum CredentialsError {
    #[error("failed to resolve credentials for profile '{profile}': {reason}")]
    Resolve { profile: String, reason: String },

    #[error("profile '{0}' requires AWS support; rebuild with the `aws` feature")]
    Unsupported(String),
}

/// Platform secret store errors.
///
/// Only surfaced by explicit keyring commands; everywhere else they degrade
/// to a soft failure.
#[derive(Error, Debug)]
pub enum KeyringError {
    #[error("keyring unavailable: {0}")]
    Unavailable(String),

    #[error("keyring is disabled in configuration")]
    Disabled,
}

/// User settings errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read settings: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("invalid setting {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    #[error(transparent)]
    Keyring(#[from] KeyringError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("{0}")]
    Other(String),
}

/// Coarse error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    InvalidName,
    Format,
    Decryption,
    ExecutableNotFound,
    Other,
}

impl Error {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Store(StoreError::NotFound(_)) => ErrorKind::NotFound,
            Error::Store(StoreError::AlreadyExists(_)) => ErrorKind::AlreadyExists,
            Error::Store(StoreError::Parse { .. })
            | Error::Store(StoreError::NameMismatch { .. }) => ErrorKind::Format,
            Error::Validation(ValidationError::InvalidName(_)) => ErrorKind::InvalidName,
            Error::Validation(ValidationError::NotMapping(_))
            | Error::Validation(ValidationError::NotText { .. }) => ErrorKind::Format,
            Error::Cipher(CipherError::DecryptionFailed(_)) => ErrorKind::Decryption,
            Error::Cipher(CipherError::MissingMemo)
            | Error::Cipher(CipherError::UnsupportedVersion(_))
            | Error::Cipher(CipherError::InvalidSalt(_)) => ErrorKind::Format,
            Error::Launch(LaunchError::ExecutableNotFound(_)) => ErrorKind::ExecutableNotFound,
            _ => ErrorKind::Other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
