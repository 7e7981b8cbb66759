//! AWS shared-config credential provider.
//!
//! Resolves a profile from `~/.aws/config` and `~/.aws/credentials` through
//! the AWS SDK's default chain, so SSO, assume-role and credential-process
//! profiles work the same way they do for the AWS CLI.
//! Enable with `--features aws` (on by default).

use tracing::{debug, warn};

use super::{CloudCredentials, CredentialProvider};
use crate::error::{CredentialsError, Result};

/// Credentials from named AWS profiles.
#[derive(Debug, Clone, Copy, Default)]
pub struct AwsProfiles;

#[cfg(feature = "aws")]
impl CredentialProvider for AwsProfiles {
    fn resolve(&self, profile: &str) -> Result<CloudCredentials> {
        use aws_credential_types::provider::ProvideCredentials;

        let fail = |reason: String| CredentialsError::Resolve {
            profile: profile.to_string(),
            reason,
        };

        debug!(profile = %profile, "resolving AWS credentials");

        // The SDK is async; a current-thread runtime is enough for one call.
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| fail(format!("failed to create runtime: {}", e)))?;

        let credentials = rt.block_on(async {
            let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .profile_name(profile)
                .load()
                .await;

            let provider = config
                .credentials_provider()
                .ok_or_else(|| fail("no credentials provider configured".to_string()))?;

            let creds = provider
                .provide_credentials()
                .await
                .map_err(|e| fail(e.to_string()))?;

            Ok::<_, CredentialsError>(CloudCredentials {
                region: config.region().map(|r| r.to_string()),
                access_key_id: creds.access_key_id().to_string(),
                secret_access_key: creds.secret_access_key().to_string(),
                session_token: creds.session_token().map(str::to_string),
                expiry: creds.expiry().map(chrono::DateTime::<chrono::Utc>::from),
            })
        })?;

        if credentials.region.is_none() {
            warn!(profile = %profile, "profile has no region; AWS_DEFAULT_REGION left unset");
        }
        match credentials.expiry {
            Some(expiry) if credentials.is_expired_at(chrono::Utc::now()) => {
                warn!(profile = %profile, expiry = %expiry, "credentials are already expired")
            }
            Some(expiry) => debug!(profile = %profile, expiry = %expiry, "credentials expire"),
            None => debug!(profile = %profile, "credentials do not expire"),
        }

        Ok(credentials)
    }
}

#[cfg(not(feature = "aws"))]
impl CredentialProvider for AwsProfiles {
    fn resolve(&self, profile: &str) -> Result<CloudCredentials> {
        warn!(profile = %profile, "built without AWS support");
        Err(CredentialsError::Unsupported(profile.to_string()).into())
    }
}
