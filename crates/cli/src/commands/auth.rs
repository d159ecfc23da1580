//! Session commands: login and logout.

use neurolab_admin::{Config, ConsoleError};
use neurolab_core::{Email, EmailError};
use secrecy::SecretString;
use thiserror::Error;

use super::build_console;

/// Errors that can occur during the auth commands.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Console operation failed.
    #[error(transparent)]
    Console(#[from] ConsoleError),

    /// The email argument is not a valid address.
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    /// Interactive password prompt failed.
    #[error("Password prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Sign in and persist the bearer token.
///
/// Prompts for the password when it was not passed as an argument.
pub async fn login(
    config: &Config,
    email: &str,
    password: Option<String>,
) -> Result<(), AuthError> {
    let email = Email::parse(email)?;

    let password = match password {
        Some(password) => SecretString::from(password),
        None => SecretString::from(
            dialoguer::Password::new()
                .with_prompt(format!("Password for {email}"))
                .interact()?,
        ),
    };

    let mut console = build_console(config)?;
    console.login(&email, &password).await?;
    Ok(())
}

/// Drop the local session token.
pub fn logout(config: &Config) -> Result<(), AuthError> {
    let mut console = build_console(config)?;
    console.logout()?;
    Ok(())
}
