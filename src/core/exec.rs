//! Process hand-off.
//!
//! An [`Invocation`] is a resolved program, its arguments and the composed
//! environment. [`ReplaceProcess`] turns it into the running process: on
//! Unix the current process image is replaced, so a successful hand-off
//! never returns.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::compose::ComposedEnvironment;
use crate::core::constants;
use crate::error::{LaunchError, Result};

/// A fully resolved launch.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub env: ComposedEnvironment,
}

/// Replace the current process with an invocation.
pub trait ReplaceProcess {
    /// Hand control to the invocation.
    ///
    /// Returns only when the hand-off failed.
    fn replace(&self, invocation: &Invocation) -> std::io::Error;
}

/// The real hand-off: `execve` on Unix, spawn-wait-exit elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exec;

impl ReplaceProcess for Exec {
    #[cfg(unix)]
    fn replace(&self, invocation: &Invocation) -> std::io::Error {
        use std::os::unix::process::CommandExt;

        debug!(program = %invocation.program.display(), args = invocation.args.len(), "exec");
        std::process::Command::new(&invocation.program)
            .args(&invocation.args)
            .env_clear()
            .envs(invocation.env.iter())
            .exec()
    }

    #[cfg(not(unix))]
    fn replace(&self, invocation: &Invocation) -> std::io::Error {
        debug!(program = %invocation.program.display(), args = invocation.args.len(), "spawn");
        let status = std::process::Command::new(&invocation.program)
            .args(&invocation.args)
            .env_clear()
            .envs(invocation.env.iter())
            .status();
        match status {
            Ok(status) => std::process::exit(status.code().unwrap_or(1)),
            Err(e) => e,
        }
    }
}

/// Resolve `command` against the composed `PATH`.
///
/// Commands containing a path separator are resolved relative to `cwd`.
///
/// # Errors
///
/// Returns `LaunchError::ExecutableNotFound` if nothing matches.
pub fn resolve_executable(command: &str, env: &ComposedEnvironment, cwd: &Path) -> Result<PathBuf> {
    if command.is_empty() {
        return Err(LaunchError::NoCommand.into());
    }

    let search: OsString = env
        .get(constants::VAR_PATH)
        .map(OsString::from)
        .unwrap_or_default();

    let program = which::which_in(command, Some(search), cwd)
        .map_err(|_| LaunchError::ExecutableNotFound(command.to_string()))?;

    debug!(command = %command, program = %program.display(), "resolved executable");
    Ok(program)
}

/// Hand off an invocation, converting a failed hand-off into an error.
pub fn hand_off(invocation: &Invocation, exec: &dyn ReplaceProcess) -> Result<std::convert::Infallible> {
    let source = exec.replace(invocation);
    Err(LaunchError::ExecFailed {
        program: invocation.program.clone(),
        source,
    }
    .into())
}
