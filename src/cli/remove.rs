//! Remove command.

use std::path::Path;

use crate::cli::{output, Context};
use crate::core::lifecycle;
use crate::error::Result;

/// Remove an environment.
pub fn execute(ctx: &Context, project_dir: &Path, name: &str) -> Result<()> {
    let removed = lifecycle::remove(project_dir, name, ctx.cache.as_ref(), &ctx.settings)?;

    if let Some(reason) = removed.toolchain.reason() {
        output::warn(&format!("venv left behind: {}", reason));
    }
    if let Some(reason) = removed.keyring.reason() {
        output::warn(&format!("cached password left behind: {}", reason));
    }

    output::success(&format!(
        "removed {}",
        output::path(removed.environment.dir().display())
    ));
    Ok(())
}
