//! Environment composition.
//!
//! Builds the variable mapping a launched process receives. Layers are
//! applied in a fixed order, each one overriding the previous:
//!
//! 1. the ambient environment (a copy; the caller's map is untouched),
//!    minus `NV_PASSWORD`
//! 2. identity markers (`NV_PROJECT`, `NV_PROJECT_DIR`, `NV_ENVIRONMENT`,
//!    `NV_ENVIRONMENT_DIR`) and the `PS1` decoration
//! 3. toolchain activation (`VIRTUAL_ENV`, `PATH` prefix)
//! 4. cloud credentials (`AWS_*`)
//! 5. user secrets, verbatim
//!
//! [`compose`] is the pure layering step. [`Composer`] gathers its inputs
//! (descriptor, password, credentials, secrets) and hands the result to a
//! [`ReplaceProcess`].

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::ffi::OsString;

use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::core::cipher::SecretCipher;
use crate::core::cloud::{CloudCredentials, CredentialProvider};
use crate::core::config::Settings;
use crate::core::constants;
use crate::core::exec::{self, Invocation, ReplaceProcess};
use crate::core::keyring::{self, PasswordCache};
use crate::core::outcome::BestEffort;
use crate::core::store::{self, Descriptor, Environment};
use crate::core::toolchain::Toolchain;
use crate::error::{LaunchError, Result};

/// The final variable mapping for a launched process.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ComposedEnvironment(BTreeMap<String, String>);

impl ComposedEnvironment {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl From<BTreeMap<String, String>> for ComposedEnvironment {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

// Values are secrets; only names are printed.
impl std::fmt::Debug for ComposedEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.0.keys()).finish()
    }
}

/// Inputs to [`compose`] beyond the ambient environment.
#[derive(Debug, Clone, Copy)]
pub struct Layers<'a> {
    pub environment: &'a Environment,
    pub descriptor: &'a Descriptor,
    pub toolchain: Option<&'a Toolchain>,
    pub cloud: Option<&'a CloudCredentials>,
    pub secrets: Option<&'a BTreeMap<String, String>>,
}

/// Layer an environment on top of `ambient`.
pub fn compose(ambient: &BTreeMap<String, String>, layers: Layers<'_>) -> Result<ComposedEnvironment> {
    let mut env = ambient.clone();
    env.remove(constants::VAR_PASSWORD);

    env.insert(
        constants::VAR_PROJECT.to_string(),
        layers.descriptor.project_name.clone(),
    );
    env.insert(
        constants::VAR_PROJECT_DIR.to_string(),
        layers.environment.project_dir().to_string_lossy().to_string(),
    );
    env.insert(
        constants::VAR_ENVIRONMENT.to_string(),
        layers.descriptor.environment_name.clone(),
    );
    env.insert(
        constants::VAR_ENVIRONMENT_DIR.to_string(),
        layers.environment.dir().to_string_lossy().to_string(),
    );

    if let Some(ps1) = ambient.get(constants::VAR_PS1) {
        env.insert(
            constants::VAR_PS1.to_string(),
            decorate_prompt(&layers.descriptor.nickname(), ps1),
        );
    }

    if let Some(toolchain) = layers.toolchain {
        toolchain.activate(&mut env)?;
    }

    if let Some(cloud) = layers.cloud {
        cloud.apply(&mut env);
    }

    if let Some(secrets) = layers.secrets {
        for (key, value) in secrets {
            env.insert(key.clone(), value.clone());
        }
    }

    Ok(ComposedEnvironment(env))
}

/// Prefix a prompt with a bold nickname, marking escapes as non-printing.
pub fn decorate_prompt(nickname: &str, ps1: &str) -> String {
    format!(r"\[\e[01m\]{}\[\e[0m\] {}", nickname, ps1)
}

/// What to compose: which environment, and how to unlock it.
#[derive(Clone)]
pub struct Request<'a> {
    pub project_dir: &'a std::path::Path,
    pub environment: &'a str,
    pub password: Option<Zeroizing<String>>,
    /// Cache an explicitly supplied password.
    pub update_keyring: bool,
}

/// A composed environment plus what happened to the password cache.
#[derive(Debug)]
pub struct Prepared {
    pub env: ComposedEnvironment,
    pub descriptor: Descriptor,
    pub keyring: BestEffort,
}

/// Gathers the layers of an environment and launches processes in it.
pub struct Composer<'a> {
    ambient: BTreeMap<String, String>,
    cache: &'a dyn PasswordCache,
    cloud: &'a dyn CredentialProvider,
    settings: &'a Settings,
}

impl<'a> Composer<'a> {
    pub fn new(
        ambient: BTreeMap<String, String>,
        cache: &'a dyn PasswordCache,
        cloud: &'a dyn CredentialProvider,
        settings: &'a Settings,
    ) -> Self {
        Self {
            ambient,
            cache,
            cloud,
            settings,
        }
    }

    /// Compose the environment for a request.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` / `ValidationError::InvalidName` for a bad
    ///   environment
    /// - `CipherError` format errors for an unusable memo
    /// - `CipherError::DecryptionFailed` when secrets cannot be opened,
    ///   including encrypted secrets with no password available
    /// - `CredentialsError` when the AWS profile cannot be resolved
    pub fn prepare(&self, request: &Request<'_>) -> Result<Prepared> {
        let (environment, descriptor) = store::load(request.project_dir, request.environment)?;
        let identity = environment.keyring_identity();

        let (password, keyring) = match &request.password {
            Some(password) if request.update_keyring => (
                Some(password.clone()),
                keyring::remember(self.cache, &identity, password),
            ),
            Some(password) => (Some(password.clone()), BestEffort::NotApplicable),
            None => (keyring::recall(self.cache, &identity), BestEffort::NotApplicable),
        };

        let cipher = match &password {
            Some(password) => SecretCipher::from_memo(descriptor.encryption.as_ref(), password)?,
            None => SecretCipher::Disabled,
        };

        let toolchain = descriptor
            .venv
            .as_deref()
            .map(|name| Toolchain::resolve(name, self.settings));

        let cloud = match descriptor.aws_profile.as_deref() {
            Some(profile) => Some(self.cloud.resolve(profile)?),
            None => None,
        };

        let secrets = store::load_secrets(&environment, &cipher)?;

        let env = compose(
            &self.ambient,
            Layers {
                environment: &environment,
                descriptor: &descriptor,
                toolchain: toolchain.as_ref(),
                cloud: cloud.as_ref(),
                secrets: secrets.as_ref(),
            },
        )?;

        info!(
            environment = %descriptor.environment_name,
            vars = env.len(),
            toolchain = toolchain.is_some(),
            cloud = cloud.is_some(),
            secrets = secrets.as_ref().map(|s| s.len()).unwrap_or(0),
            "environment composed"
        );

        Ok(Prepared {
            env,
            descriptor,
            keyring,
        })
    }

    /// Compose and resolve a command without launching it.
    pub fn plan(&self, request: &Request<'_>, command: &str, args: &[String]) -> Result<Invocation> {
        let prepared = self.prepare(request)?;
        let cwd = std::env::current_dir()?;
        let program = exec::resolve_executable(command, &prepared.env, &cwd)?;
        Ok(Invocation {
            program,
            args: args.to_vec(),
            env: prepared.env,
        })
    }

    /// Replace the current process with `command` inside the environment.
    ///
    /// Returns only on failure.
    pub fn invoke(
        &self,
        request: &Request<'_>,
        command: &str,
        args: &[String],
        exec: &dyn ReplaceProcess,
    ) -> Result<Infallible> {
        let invocation = self.plan(request, command, args)?;
        exec::hand_off(&invocation, exec)
    }

    /// Replace the current process with the user's shell.
    pub fn launch_shell(&self, request: &Request<'_>, exec: &dyn ReplaceProcess) -> Result<Infallible> {
        let shell = self.shell();
        debug!(shell = %shell, "launching shell");
        self.invoke(request, &shell, &[], exec)
    }

    /// The shell to launch: `$SHELL`, then settings, then `/bin/sh`.
    pub fn shell(&self) -> String {
        self.ambient
            .get(constants::VAR_SHELL)
            .filter(|s| !s.is_empty())
            .cloned()
            .or_else(|| self.settings.shell.clone())
            .unwrap_or_else(|| constants::FALLBACK_SHELL.to_string())
    }
}

/// Snapshot the current process environment.
///
/// Entries whose name or value is not UTF-8 cannot be carried in the
/// composed map; they are skipped and their names logged.
pub fn ambient_environment() -> BTreeMap<String, String> {
    utf8_entries(std::env::vars_os())
}

fn utf8_entries(vars: impl Iterator<Item = (OsString, OsString)>) -> BTreeMap<String, String> {
    let mut env = BTreeMap::new();
    for (key, value) in vars {
        match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => {
                env.insert(key, value);
            }
            (Ok(key), Err(_)) => debug!(name = %key, "skipping variable with non-UTF-8 value"),
            (Err(key), _) => {
                debug!(name = %key.to_string_lossy(), "skipping variable with non-UTF-8 name")
            }
        }
    }
    env
}

/// Split a command line into program and arguments.
pub fn split_command(command: &[String]) -> Result<(&str, &[String])> {
    command
        .split_first()
        .map(|(program, args)| (program.as_str(), args))
        .ok_or_else(|| LaunchError::NoCommand.into())
}
