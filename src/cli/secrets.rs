//! Secrets commands.

use std::path::Path;

use crate::cli::{output, password, Context, PasswordArgs};
use crate::core::keyring;
use crate::core::lifecycle::{self, Unlocked};
use crate::core::validation;
use crate::error::Result;

fn open(ctx: &Context, project_dir: &Path, name: &str, args: &PasswordArgs) -> Result<Unlocked> {
    let password = password::resolve(args, false)?;
    let remember = args.remember.then(|| password.clone()).flatten();
    let unlocked = lifecycle::unlock(project_dir, name, password, ctx.cache.as_ref())?;

    if let Some(password) = remember {
        let identity = unlocked.environment.keyring_identity();
        if let Some(reason) = keyring::remember(ctx.cache.as_ref(), &identity, &password).reason() {
            output::warn(&format!("password not cached: {}", reason));
        }
    }
    Ok(unlocked)
}

/// List secret names.
pub fn list(ctx: &Context, project_dir: &Path, name: &str, args: &PasswordArgs) -> Result<()> {
    let unlocked = open(ctx, project_dir, name, args)?;

    if unlocked.secrets.is_empty() {
        output::dimmed("no secrets stored");
        return Ok(());
    }
    for key in unlocked.secrets.keys() {
        println!("{}", key);
    }
    Ok(())
}

/// Set secrets from `KEY=VALUE` assignments.
pub fn set(
    ctx: &Context,
    project_dir: &Path,
    name: &str,
    args: &PasswordArgs,
    assignments: &[String],
) -> Result<()> {
    let parsed = assignments
        .iter()
        .map(|raw| validation::parse_assignment(raw))
        .collect::<Result<Vec<_>>>()?;

    let mut unlocked = open(ctx, project_dir, name, args)?;
    for (key, value) in &parsed {
        unlocked.set(key, value)?;
    }
    unlocked.save()?;

    for (key, _) in &parsed {
        output::success(&format!("set {}", output::key(key)));
    }
    Ok(())
}

/// Remove secrets by key.
pub fn unset(
    ctx: &Context,
    project_dir: &Path,
    name: &str,
    args: &PasswordArgs,
    keys: &[String],
) -> Result<()> {
    let mut unlocked = open(ctx, project_dir, name, args)?;

    let mut changed = false;
    for key in keys {
        if unlocked.unset(key) {
            changed = true;
            output::success(&format!("removed {}", output::key(key)));
        } else {
            output::warn(&format!("{} is not set", output::key(key)));
        }
    }
    if changed {
        unlocked.save()?;
    }
    Ok(())
}
