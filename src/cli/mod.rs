//! Command-line interface.

pub mod completions;
pub mod create;
pub mod keyring;
pub mod output;
pub mod password;
pub mod remove;
pub mod run;
pub mod secrets;
pub mod shell;
pub mod status;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::core::config::Settings;
use crate::core::keyring::PasswordCache;
use crate::error::Result;

/// nv - per-project environments with encrypted secrets.
#[derive(Parser)]
#[command(
    name = "nv",
    about = "Per-project environments with encrypted secrets",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project directory holding the environments
    #[arg(short = 'd', long = "project-dir", global = true, default_value = ".")]
    pub project_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create an environment
    Create {
        /// Environment name (omit for the default environment)
        #[arg(default_value = "")]
        name: String,
        /// Project name (defaults to the directory name)
        #[arg(short, long)]
        project: Option<String>,
        /// Create a Python virtual environment for it
        #[arg(long)]
        venv: bool,
        /// AWS profile whose credentials are exported on launch
        #[arg(long, value_name = "PROFILE")]
        aws_profile: Option<String>,
        /// Store a secret (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
        #[command(flatten)]
        password: PasswordArgs,
    },

    /// Remove an environment, its toolchain and cached password
    Rm {
        /// Environment name
        #[arg(default_value = "")]
        name: String,
    },

    /// Launch your shell inside an environment
    Shell {
        /// Environment name
        #[arg(default_value = "")]
        name: String,
        #[command(flatten)]
        password: PasswordArgs,
    },

    /// Run a command inside an environment
    Run {
        /// Environment name
        #[arg(short, long, default_value = "")]
        env: String,
        #[command(flatten)]
        password: PasswordArgs,
        /// Command and arguments to run
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        command: Vec<String>,
    },

    /// Describe an environment without decrypting it
    Status {
        /// Environment name
        #[arg(default_value = "")]
        name: String,
    },

    /// Edit the secrets of an environment
    Secrets {
        #[command(subcommand)]
        action: SecretsAction,
    },

    /// Manage cached passwords
    Keyring {
        #[command(subcommand)]
        action: KeyringAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Password sources shared by commands that open secrets.
#[derive(Args, Clone, Default)]
pub struct PasswordArgs {
    /// Password for encrypted secrets
    #[arg(long, env = "NV_PASSWORD", hide_env_values = true, conflicts_with = "ask_password")]
    pub password: Option<String>,
    /// Prompt for the password
    #[arg(long)]
    pub ask_password: bool,
    /// Cache the password in the system keyring
    #[arg(long)]
    pub remember: bool,
}

/// Secrets subcommands.
#[derive(Subcommand)]
pub enum SecretsAction {
    /// List secret names
    List {
        /// Environment name
        #[arg(short, long, default_value = "")]
        env: String,
        #[command(flatten)]
        password: PasswordArgs,
    },

    /// Set one or more secrets
    Set {
        /// Assignments
        #[arg(value_name = "KEY=VALUE", required = true)]
        assignments: Vec<String>,
        /// Environment name
        #[arg(short, long, default_value = "")]
        env: String,
        #[command(flatten)]
        password: PasswordArgs,
    },

    /// Remove one or more secrets
    Unset {
        /// Secret keys
        #[arg(required = true)]
        keys: Vec<String>,
        /// Environment name
        #[arg(short, long, default_value = "")]
        env: String,
        #[command(flatten)]
        password: PasswordArgs,
    },
}

/// Keyring subcommands.
#[derive(Subcommand)]
pub enum KeyringAction {
    /// Check a password and cache it
    Store {
        /// Environment name
        #[arg(default_value = "")]
        name: String,
        /// Password (prompted when omitted)
        #[arg(long, env = "NV_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Remove a cached password
    Forget {
        /// Environment name
        #[arg(default_value = "")]
        name: String,
    },
}

/// Settings and password cache for one run.
pub struct Context {
    pub settings: Settings,
    pub cache: Box<dyn PasswordCache>,
}

impl Context {
    pub fn load() -> Result<Self> {
        let settings = Settings::load()?;
        let cache = crate::core::keyring::from_settings(&settings.keyring);
        Ok(Self { settings, cache })
    }
}

/// Execute a command.
pub fn execute(command: Command, project_dir: &Path) -> Result<()> {
    if let Command::Completions { shell } = &command {
        return completions::execute(*shell);
    }

    let ctx = Context::load()?;

    match command {
        Command::Create {
            name,
            project,
            venv,
            aws_profile,
            set,
            password,
        } => create::execute(
            &ctx,
            project_dir,
            create::Options {
                name,
                project,
                venv,
                aws_profile,
                set,
                password,
            },
        ),
        Command::Rm { name } => remove::execute(&ctx, project_dir, &name),
        Command::Shell { name, password } => shell::execute(&ctx, project_dir, &name, &password),
        Command::Run {
            env,
            password,
            command,
        } => run::execute(&ctx, project_dir, &env, &password, &command),
        Command::Status { name } => status::execute(&ctx, project_dir, &name),
        Command::Secrets { action } => match action {
            SecretsAction::List { env, password } => secrets::list(&ctx, project_dir, &env, &password),
            SecretsAction::Set {
                assignments,
                env,
                password,
            } => secrets::set(&ctx, project_dir, &env, &password, &assignments),
            SecretsAction::Unset {
                keys,
                env,
                password,
            } => secrets::unset(&ctx, project_dir, &env, &password, &keys),
        },
        Command::Keyring { action } => match action {
            KeyringAction::Store { name, password } => {
                keyring::store(&ctx, project_dir, &name, password)
            }
            KeyringAction::Forget { name } => keyring::forget(&ctx, project_dir, &name),
        },
        Command::Completions { .. } => Ok(()),
    }
}
