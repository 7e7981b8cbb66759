//! Status command.
//!
//! Describes an environment from its descriptor alone; secrets are never
//! decrypted.

use std::path::Path;

use crate::cli::{output, Context};
use crate::core::store;
use crate::core::toolchain::Toolchain;
use crate::error::Result;

/// Show an environment's descriptor.
pub fn execute(ctx: &Context, project_dir: &Path, name: &str) -> Result<()> {
    let (environment, descriptor) = store::load(project_dir, name)?;

    output::section(&descriptor.nickname());
    output::kv("project", &descriptor.project_name);
    output::kv(
        "environment",
        if descriptor.environment_name.is_empty() {
            "(default)"
        } else {
            descriptor.environment_name.as_str()
        },
    );
    output::kv("directory", output::path(environment.dir().display()));

    let secrets = match (environment.has_secrets(), descriptor.is_encrypted()) {
        (false, _) => "none",
        (true, true) => "encrypted",
        (true, false) => "plain",
    };
    output::kv("secrets", secrets);

    output::kv(
        "aws profile",
        descriptor.aws_profile.as_deref().unwrap_or("none"),
    );

    match descriptor.venv.as_deref() {
        Some(venv) => {
            let toolchain = Toolchain::resolve(venv, &ctx.settings);
            let state = if toolchain.root().is_dir() {
                output::path(toolchain.root().display())
            } else {
                format!("{} (missing)", toolchain.root().display())
            };
            output::kv("venv", state);
        }
        None => output::kv("venv", "none"),
    }

    Ok(())
}
