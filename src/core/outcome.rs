//! Best-effort operation results.
//!
//! Keyring writes and toolchain teardown may fail without aborting the
//! operation they belong to. They report a [`BestEffort`] instead of an
//! error so callers can show the reason without branching on `Result`.

use std::fmt;

/// Outcome of an operation whose failure is acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum BestEffort {
    /// The operation completed.
    Done,
    /// The operation was not needed.
    NotApplicable,
    /// The operation failed; the caller continues.
    Skipped { reason: String },
}

impl BestEffort {
    /// Build a skipped outcome from any displayable failure.
    pub fn skipped(reason: impl fmt::Display) -> Self {
        BestEffort::Skipped {
            reason: reason.to_string(),
        }
    }

    /// Whether the operation failed.
    pub fn is_skipped(&self) -> bool {
        matches!(self, BestEffort::Skipped { .. })
    }

    /// The failure reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            BestEffort::Skipped { reason } => Some(reason),
            _ => None,
        }
    }
}

impl<E: fmt::Display> From<std::result::Result<(), E>> for BestEffort {
    fn from(result: std::result::Result<(), E>) -> Self {
        match result {
            Ok(()) => BestEffort::Done,
            Err(e) => BestEffort::skipped(e),
        }
    }
}
