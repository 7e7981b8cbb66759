//! Keyring commands.

use std::path::Path;

use zeroize::Zeroizing;

use crate::cli::{output, password, Context};
use crate::core::lifecycle;
use crate::error::Result;

/// Check a password against an environment and cache it.
pub fn store(ctx: &Context, project_dir: &Path, name: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => Zeroizing::new(password),
        None => password::prompt(false)?,
    };
    let environment = lifecycle::store_password(project_dir, name, &password, ctx.cache.as_ref())?;
    output::success(&format!(
        "password cached for {}",
        output::path(environment.dir().display())
    ));
    Ok(())
}

/// Remove the cached password of an environment.
pub fn forget(ctx: &Context, project_dir: &Path, name: &str) -> Result<()> {
    let environment = lifecycle::forget_password(project_dir, name, ctx.cache.as_ref())?;
    output::success(&format!(
        "forgot password for {}",
        output::path(environment.dir().display())
    ));
    Ok(())
}
