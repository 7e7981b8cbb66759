//! Create command.

use std::collections::BTreeMap;
use std::path::Path;

use crate::cli::{output, password, Context, PasswordArgs};
use crate::core::lifecycle::{self, CreateOptions};
use crate::core::outcome::BestEffort;
use crate::core::validation;
use crate::error::Result;

/// Arguments of `nv create`.
pub struct Options {
    pub name: String,
    pub project: Option<String>,
    pub venv: bool,
    pub aws_profile: Option<String>,
    pub set: Vec<String>,
    pub password: PasswordArgs,
}

/// Create an environment.
pub fn execute(ctx: &Context, project_dir: &Path, options: Options) -> Result<()> {
    let mut secrets = BTreeMap::new();
    for raw in &options.set {
        let (key, value) = validation::parse_assignment(raw)?;
        secrets.insert(key, value);
    }

    let password = password::resolve(&options.password, true)?;
    if options.password.remember && password.is_none() {
        output::warn("--remember has no effect without a password");
    }

    let created = lifecycle::create(
        project_dir,
        CreateOptions {
            name: options.name,
            project_name: options.project,
            aws_profile: options.aws_profile,
            secrets,
            password,
            remember: options.password.remember,
            venv: options.venv,
        },
        ctx.cache.as_ref(),
        &ctx.settings,
    )?;

    output::success(&format!(
        "created {}",
        output::path(created.environment.dir().display())
    ));
    output::kv("project", &created.descriptor.project_name);
    if !created.descriptor.environment_name.is_empty() {
        output::kv("environment", &created.descriptor.environment_name);
    }
    output::kv(
        "secrets",
        if created.descriptor.is_encrypted() {
            "encrypted"
        } else {
            "plain"
        },
    );
    if let Some(profile) = &created.descriptor.aws_profile {
        output::kv("aws profile", profile);
    }
    if let Some(toolchain) = &created.toolchain {
        output::kv("venv", output::path(toolchain.root().display()));
    }

    match &created.keyring {
        BestEffort::Done => output::success("password cached in keyring"),
        BestEffort::Skipped { reason } => {
            output::warn(&format!("password not cached: {}", reason))
        }
        BestEffort::NotApplicable => {}
    }

    let launch = if created.descriptor.environment_name.is_empty() {
        "nv shell".to_string()
    } else {
        format!("nv shell {}", created.descriptor.environment_name)
    };
    output::hint(&format!("enter it with {}", output::cmd(&launch)));
    Ok(())
}
