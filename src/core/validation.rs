//! Input validation for nv operations.
//!
//! Validates environment names, secret payload shape and secret key names.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{Result, ValidationError};

/// Validate an environment name.
///
/// The empty string names the default environment. Anything else must match
/// `^[a-z][a-z0-9]*(-[a-z0-9]+)*$`, which also rules out path separators and
/// leading dots. Runs before any filesystem access.
///
/// # Errors
///
/// Returns `ValidationError::InvalidName` if the name is rejected.
pub fn validate_environment_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Ok(());
    }

    let invalid = || ValidationError::InvalidName(name.to_string()).into();

    for segment in name.split('-') {
        let mut chars = segment.chars();
        match chars.next() {
            Some(c) if c.is_ascii_lowercase() || c.is_ascii_digit() => {}
            _ => return Err(invalid()),
        }
        if !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()) {
            return Err(invalid());
        }
    }

    // The first segment must start with a letter, later ones may start with a digit.
    if !name.starts_with(|c: char| c.is_ascii_lowercase()) {
        return Err(invalid());
    }

    Ok(())
}

/// Validate a secret key name given on the command line.
///
/// Keys must be usable as environment variable names:
/// - Only ASCII letters, digits and underscore
/// - Cannot start with a digit
/// - Cannot be empty
///
/// # Errors
///
/// Returns `ValidationError::InvalidKey` if the key is invalid.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(ValidationError::InvalidKey {
            key: String::new(),
            reason: "key cannot be empty".to_string(),
        }
        .into());
    }

    if key.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidKey {
            key: key.to_string(),
            reason: "cannot start with a digit".to_string(),
        }
        .into());
    }

    for (i, ch) in key.chars().enumerate() {
        if !ch.is_ascii_alphanumeric() && ch != '_' {
            return Err(ValidationError::InvalidKey {
                key: key.to_string(),
                reason: format!(
                    "invalid character '{}' at position {}. Only letters, digits and underscore are allowed",
                    ch,
                    i + 1
                ),
            }
            .into());
        }
    }

    Ok(())
}

/// Parse a `KEY=VALUE` assignment.
pub fn parse_assignment(raw: &str) -> Result<(String, String)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| ValidationError::InvalidAssignment(raw.to_string()))?;
    let key = key.trim();
    validate_key(key)?;
    Ok((key.to_string(), value.to_string()))
}

/// Check that a decoded JSON document is a mapping of text values.
///
/// Values are never coerced: a number, boolean, null or nested structure is
/// a data-shape error.
///
/// # Errors
///
/// Returns `ValidationError::NotMapping` or `ValidationError::NotText`.
pub fn validate_payload(value: Value) -> Result<BTreeMap<String, String>> {
    let object = match value {
        Value::Object(object) => object,
        other => return Err(ValidationError::NotMapping(type_name(&other)).into()),
    };

    let mut secrets = BTreeMap::new();
    for (key, value) in object {
        match value {
            Value::String(text) => {
                secrets.insert(key, text);
            }
            other => {
                return Err(ValidationError::NotText {
                    key,
                    found: type_name(&other),
                }
                .into())
            }
        }
    }
    Ok(secrets)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
