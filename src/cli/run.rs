//! Run command.
//!
//! Replaces nv with the given command, running inside the environment.

use std::path::Path;

use crate::cli::{password, shell, Context, PasswordArgs};
use crate::core::cloud::AwsProfiles;
use crate::core::compose::{self, Composer};
use crate::core::exec::Exec;
use crate::error::Result;

/// Run a command inside an environment.
pub fn execute(
    ctx: &Context,
    project_dir: &Path,
    name: &str,
    args: &PasswordArgs,
    command: &[String],
) -> Result<()> {
    let (program, program_args) = compose::split_command(command)?;
    let password = password::resolve(args, false)?;
    let composer = Composer::new(
        compose::ambient_environment(),
        ctx.cache.as_ref(),
        &AwsProfiles,
        &ctx.settings,
    );
    let request = shell::request(project_dir, name, password, args.remember);
    match composer.invoke(&request, program, program_args, &Exec)? {}
}
