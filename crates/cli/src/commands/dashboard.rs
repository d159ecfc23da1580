//! Dashboard summary cards.

use neurolab_admin::{Config, ConsoleError};

use super::build_console;

/// Load all collections and print the summary statistics.
pub async fn show(config: &Config) -> Result<(), ConsoleError> {
    let mut console = build_console(config)?;
    console.load_all().await?;

    let stats = console.store().stats();
    tracing::info!("Partner requests: {}", stats.total_requests);
    tracing::info!("  pending:  {}", stats.pending_requests);
    tracing::info!("  approved: {}", stats.approved_requests);
    tracing::info!("  rejected: {}", stats.rejected_requests);
    tracing::info!("Contact messages: {}", stats.total_contacts);
    tracing::info!("Whitelist entries: {}", console.store().whitelist().len());
    Ok(())
}
