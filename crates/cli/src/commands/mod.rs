//! CLI command implementations.

pub mod auth;
pub mod contacts;
pub mod dashboard;
pub mod export;
pub mod requests;
pub mod whitelist;

use neurolab_admin::{AdminConsole, Config, ConsoleError, FileSessionStore};

/// Build a console over the file-backed session store.
pub fn build_console(config: &Config) -> Result<AdminConsole<FileSessionStore>, ConsoleError> {
    let session = FileSessionStore::new(config.token_file.clone());
    AdminConsole::new(config, session)
}
