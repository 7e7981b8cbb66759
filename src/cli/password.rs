//! Password input.

use dialoguer::Password;
use zeroize::Zeroizing;

use crate::cli::PasswordArgs;
use crate::error::{Error, Result};

/// Resolve the password given on the command line, prompting if asked.
///
/// `confirm` asks twice, for passwords that are about to encrypt something.
pub fn resolve(args: &PasswordArgs, confirm: bool) -> Result<Option<Zeroizing<String>>> {
    if let Some(password) = &args.password {
        return non_empty(Zeroizing::new(password.clone())).map(Some);
    }
    if args.ask_password {
        return prompt(confirm).map(Some);
    }
    Ok(None)
}

/// Prompt for a password on the terminal.
pub fn prompt(confirm: bool) -> Result<Zeroizing<String>> {
    let mut input = Password::new();
    input = input.with_prompt("Password");
    if confirm {
        input = input.with_confirmation("Confirm password", "passwords do not match");
    }
    non_empty(Zeroizing::new(input.interact()?))
}

fn non_empty(password: Zeroizing<String>) -> Result<Zeroizing<String>> {
    if password.is_empty() {
        return Err(Error::Other("password cannot be empty".to_string()));
    }
    Ok(password)
}
