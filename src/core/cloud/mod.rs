//! Temporary cloud credentials.
//!
//! An environment may name an AWS profile. On every launch the profile is
//! resolved to short-lived credentials which are exported through the
//! standard `AWS_*` variables. Credentials are never cached or renewed here.

mod aws;

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::core::constants;
use crate::error::Result;

pub use aws::AwsProfiles;

/// Resolved credentials for one profile.
#[derive(Clone)]
pub struct CloudCredentials {
    pub region: Option<String>,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
    pub expiry: Option<DateTime<Utc>>,
}

impl fmt::Debug for CloudCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudCredentials")
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .field("expiry", &self.expiry)
            .finish()
    }
}

impl CloudCredentials {
    /// Whether the credentials have already expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry.map(|expiry| expiry <= now).unwrap_or(false)
    }

    /// Overlay the credential variables onto an environment mapping.
    ///
    /// The session token is always set, empty for long-lived keys, so a
    /// token inherited from the parent shell cannot pair with the new keys.
    pub fn apply(&self, env: &mut BTreeMap<String, String>) {
        if let Some(region) = &self.region {
            env.insert(constants::VAR_AWS_REGION.to_string(), region.clone());
        }
        env.insert(
            constants::VAR_AWS_ACCESS_KEY_ID.to_string(),
            self.access_key_id.clone(),
        );
        env.insert(
            constants::VAR_AWS_SECRET_ACCESS_KEY.to_string(),
            self.secret_access_key.clone(),
        );
        env.insert(
            constants::VAR_AWS_SESSION_TOKEN.to_string(),
            self.session_token.clone().unwrap_or_default(),
        );
    }
}

/// Source of credentials for a named profile.
pub trait CredentialProvider {
    /// Resolve credentials for `profile`.
    fn resolve(&self, profile: &str) -> Result<CloudCredentials>;
}
