//! Contact message browsing.

use neurolab_admin::{Config, ConsoleError};

use super::build_console;

/// List contact messages matching the search term.
pub async fn list(config: &Config, search: Option<String>) -> Result<(), ConsoleError> {
    let mut console = build_console(config)?;
    console.load_all().await?;

    if let Some(term) = search {
        console.store_mut().set_search_term(term);
    }

    let total = console.store().contacts().len();
    let visible = console.store().visible_contacts();
    tracing::info!("{} of {} contact messages", visible.len(), total);
    for contact in visible {
        tracing::info!(
            "{}  {} <{}> - {}",
            contact.id,
            contact.name,
            contact.email,
            contact.subject,
        );
    }
    Ok(())
}
