//! Core library components.
//!
//! Everything here is independent of the command line: the on-disk store,
//! the secret cipher, the password cache, and the environment composer.

pub mod cipher;
pub mod cloud;
pub mod compose;
pub mod config;
pub mod constants;
pub mod exec;
pub mod kdf;
pub mod keyring;
pub mod lifecycle;
pub mod outcome;
pub mod store;
pub mod toolchain;
pub mod validation;
