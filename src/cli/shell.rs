//! Shell command.
//!
//! Replaces nv with the user's shell, running inside the environment.

use std::path::Path;

use zeroize::Zeroizing;

use crate::cli::{password, Context, PasswordArgs};
use crate::core::cloud::AwsProfiles;
use crate::core::compose::{self, Composer, Request};
use crate::core::exec::Exec;
use crate::error::Result;

/// Launch a shell inside an environment.
pub fn execute(ctx: &Context, project_dir: &Path, name: &str, args: &PasswordArgs) -> Result<()> {
    let password = password::resolve(args, false)?;
    let composer = Composer::new(
        compose::ambient_environment(),
        ctx.cache.as_ref(),
        &AwsProfiles,
        &ctx.settings,
    );
    let request = request(project_dir, name, password, args.remember);
    match composer.launch_shell(&request, &Exec)? {}
}

pub(crate) fn request<'a>(
    project_dir: &'a Path,
    name: &'a str,
    password: Option<Zeroizing<String>>,
    remember: bool,
) -> Request<'a> {
    Request {
        project_dir,
        environment: name,
        update_keyring: remember && password.is_some(),
        password,
    }
}
