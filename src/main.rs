//! nv - per-project environments with encrypted secrets.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use nv::cli::output;
use nv::cli::{execute, Cli};
use nv::error::{Error, ErrorKind};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("NV_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("nv=debug")
        } else {
            EnvFilter::new("nv=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli.command, &cli.project_dir) {
        output::error(&e.to_string());
        if let Some(hint) = suggestion(&e) {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}

fn suggestion(e: &Error) -> Option<&'static str> {
    match e.kind() {
        ErrorKind::NotFound => Some("run: nv create"),
        ErrorKind::AlreadyExists => Some("run: nv rm, then create it again"),
        ErrorKind::InvalidName => Some("names are lowercase words joined by '-', e.g. my-env2"),
        ErrorKind::Decryption => Some("pass --ask-password, or cache it with: nv keyring store"),
        ErrorKind::ExecutableNotFound => Some("check the command is on the environment's PATH"),
        _ => match e {
            Error::Credentials(_) => Some("check the profile with: aws configure list"),
            _ => None,
        },
    }
}
