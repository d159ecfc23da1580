//! Registration whitelist management.

use neurolab_admin::{Config, ConsoleError};
use neurolab_core::Email;

use super::build_console;

/// List whitelist entries matching the search term.
pub async fn list(config: &Config, search: Option<String>) -> Result<(), ConsoleError> {
    let mut console = build_console(config)?;
    console.load_all().await?;

    if let Some(term) = search {
        console.store_mut().set_search_term(term);
    }

    let total = console.store().whitelist().len();
    let visible = console.store().visible_whitelist();
    tracing::info!("{} of {} whitelist entries", visible.len(), total);
    for entry in visible {
        tracing::info!(
            "{}  {}  {}",
            entry.id,
            entry.email,
            if entry.is_registered {
                "registered"
            } else {
                "not registered"
            },
        );
    }
    Ok(())
}

/// Whitelist an email address for admin registration.
pub async fn add(config: &Config, email: &str) -> Result<(), ConsoleError> {
    let mut console = build_console(config)?;
    console.load_all().await?;

    console.store_mut().set_new_email_draft(email);
    if let Err(e) = console.add_to_whitelist().await {
        // The draft error carries the server's explanation when there is one.
        if let Some(detail) = console.store().email_error() {
            tracing::error!("{detail}");
        }
        return Err(e);
    }

    tracing::info!("{email} added to whitelist");
    Ok(())
}

/// Remove an email address from the whitelist.
pub async fn remove(config: &Config, email: &str) -> Result<(), ConsoleError> {
    let email = Email::parse(email)?;

    let mut console = build_console(config)?;
    console.load_all().await?;
    console.remove_from_whitelist(&email).await?;

    tracing::info!("{email} removed from whitelist");
    Ok(())
}
