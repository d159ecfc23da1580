//! Partner request browsing and triage.

use neurolab_admin::{Config, ConsoleError, StatusFilter};
use neurolab_core::RequestId;

use super::build_console;

/// List partner requests matching the filter and search term.
pub async fn list(
    config: &Config,
    filter: StatusFilter,
    search: Option<String>,
) -> Result<(), ConsoleError> {
    let mut console = build_console(config)?;
    console.load_all().await?;

    let store = console.store_mut();
    store.set_status_filter(filter);
    if let Some(term) = search {
        store.set_search_term(term);
    }

    let total = console.store().stats().total_requests;
    let visible = console.store().visible_partner_requests();
    tracing::info!("{} of {} partner requests", visible.len(), total);
    for request in visible {
        tracing::info!(
            "{}  [{}]  {} - {} <{}>",
            request.id,
            request.status,
            request.company_name,
            request.contact_person,
            request.email,
        );
    }
    Ok(())
}

/// Show every field of one partner request.
pub async fn show(config: &Config, id: &str) -> Result<(), ConsoleError> {
    let id = RequestId::new(id);
    let mut console = build_console(config)?;
    console.load_all().await?;

    let request = console
        .store()
        .partner_request(&id)
        .ok_or_else(|| ConsoleError::UnknownRequest(id.clone()))?;

    tracing::info!("Company:       {}", request.company_name);
    tracing::info!("Contact:       {}", request.contact_person);
    tracing::info!("Email:         {}", request.email);
    tracing::info!("Phone:         {}", request.phone);
    tracing::info!("Website:       {}", request.website);
    tracing::info!("Business type: {}", request.business_type);
    tracing::info!("Status:        {}", request.status);
    tracing::info!("Submitted:     {}", request.created_at.to_rfc3339());
    tracing::info!("Message:       {}", request.message);
    Ok(())
}

/// Approve a pending request.
pub async fn approve(config: &Config, id: &str) -> Result<(), ConsoleError> {
    let id = RequestId::new(id);
    let mut console = build_console(config)?;
    console.load_all().await?;
    console.approve(&id).await?;
    tracing::info!("Request {id} approved");
    Ok(())
}

/// Reject a pending request.
pub async fn reject(config: &Config, id: &str) -> Result<(), ConsoleError> {
    let id = RequestId::new(id);
    let mut console = build_console(config)?;
    console.load_all().await?;
    console.reject(&id).await?;
    tracing::info!("Request {id} rejected");
    Ok(())
}
