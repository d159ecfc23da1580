//! Wire types for the Neurolab backend API.
//!
//! The backend wraps list responses in envelopes whose shapes differ per
//! endpoint (`{data: {partnerRequests: [...]}}`, `{data: [...]}`,
//! `{data: {whitelist: [...]}}`). These adapters are the only place that
//! irregularity exists: every envelope normalizes to a plain vector before
//! the rest of the crate sees it.

use neurolab_core::{Contact, PartnerRequest, RequestStatus, WhitelistEntry};
use serde::{Deserialize, Serialize};

/// `GET /partner-requests` response body.
#[derive(Debug, Deserialize)]
pub(crate) struct PartnerRequestsEnvelope {
    data: PartnerRequestsData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartnerRequestsData {
    #[serde(default)]
    partner_requests: Vec<PartnerRequest>,
}

impl PartnerRequestsEnvelope {
    pub(crate) fn into_items(self) -> Vec<PartnerRequest> {
        self.data.partner_requests
    }
}

/// `GET /contacts` response body. This endpoint nests the collection
/// directly under `data` with no inner key.
#[derive(Debug, Deserialize)]
pub(crate) struct ContactsEnvelope {
    #[serde(default)]
    data: Vec<Contact>,
}

impl ContactsEnvelope {
    pub(crate) fn into_items(self) -> Vec<Contact> {
        self.data
    }
}

/// `GET /whitelist` response body.
#[derive(Debug, Deserialize)]
pub(crate) struct WhitelistEnvelope {
    data: WhitelistData,
}

#[derive(Debug, Deserialize)]
struct WhitelistData {
    #[serde(default)]
    whitelist: Vec<WhitelistEntry>,
}

impl WhitelistEnvelope {
    pub(crate) fn into_items(self) -> Vec<WhitelistEntry> {
        self.data.whitelist
    }
}

/// `POST /whitelist` response body: the created entry.
#[derive(Debug, Deserialize)]
pub(crate) struct WhitelistAddEnvelope {
    data: WhitelistAddData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WhitelistAddData {
    whitelist_entry: WhitelistEntry,
}

impl WhitelistAddEnvelope {
    pub(crate) fn into_entry(self) -> WhitelistEntry {
        self.data.whitelist_entry
    }
}

/// `POST /login` request body.
#[derive(Debug, Serialize)]
pub(crate) struct LoginBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// `POST /login` response body. The backend issues the token top-level.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub token: String,
}

/// `PATCH /partner-requests/{id}/status` request body.
#[derive(Debug, Serialize)]
pub(crate) struct StatusBody {
    pub status: RequestStatus,
}

/// `POST /whitelist` request body.
#[derive(Debug, Serialize)]
pub(crate) struct AddEmailBody<'a> {
    pub email: &'a str,
}

/// Error payload the backend attaches to non-2xx responses.
///
/// Some routes use `message`, some `error`; both are optional.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    /// The server-provided error text, if any.
    pub(crate) fn into_message(self) -> Option<String> {
        self.message.or(self.error).filter(|m| !m.is_empty())
    }
}
