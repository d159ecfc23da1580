//! In-memory triage state for the admin dashboard.
//!
//! [`TriageStore`] holds the cached copies of the three backend collections
//! plus the dashboard's ephemeral UI state (search term, status filter,
//! expanded row, refresh flag, whitelist draft). Visible subsets and summary
//! statistics are pure derivations - recomputed on every call, never cached,
//! so they cannot desynchronize from the collections.

use neurolab_core::{
    Contact, Email, ItemId, PartnerRequest, RequestId, RequestStatus, WhitelistEntry,
};

/// Status filter applied to the partner-request list only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    /// Show every request.
    #[default]
    All,
    /// Show only requests with the given status.
    Only(RequestStatus),
}

impl StatusFilter {
    /// Whether a request with `status` passes this filter.
    #[must_use]
    pub fn matches(self, status: RequestStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => status == wanted,
        }
    }
}

impl core::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => f.write_str(status.as_str()),
        }
    }
}

/// Summary counts for the dashboard's stat cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    /// All partner requests.
    pub total_requests: usize,
    /// Requests awaiting a decision.
    pub pending_requests: usize,
    /// Approved requests.
    pub approved_requests: usize,
    /// Rejected requests.
    pub rejected_requests: usize,
    /// All contact messages.
    pub total_contacts: usize,
}

/// Cached collections plus dashboard UI state.
#[derive(Debug, Default)]
pub struct TriageStore {
    partner_requests: Vec<PartnerRequest>,
    contacts: Vec<Contact>,
    whitelist: Vec<WhitelistEntry>,

    search_term: String,
    status_filter: StatusFilter,
    expanded: Option<ItemId>,
    is_refreshing: bool,
    new_email_draft: String,
    email_error: Option<String>,
}

impl TriageStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Collections
    // =========================================================================

    /// Replace all three collections after a fetch.
    ///
    /// UI state (search, filter, expansion, draft) is deliberately left
    /// untouched so a refresh does not reset the admin's view.
    pub fn set_collections(
        &mut self,
        partner_requests: Vec<PartnerRequest>,
        contacts: Vec<Contact>,
        whitelist: Vec<WhitelistEntry>,
    ) {
        self.partner_requests = partner_requests;
        self.contacts = contacts;
        self.whitelist = whitelist;
    }

    /// The full partner-request collection, in server order.
    #[must_use]
    pub fn partner_requests(&self) -> &[PartnerRequest] {
        &self.partner_requests
    }

    /// The full contact collection, in server order.
    #[must_use]
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// The full whitelist, in server order.
    #[must_use]
    pub fn whitelist(&self) -> &[WhitelistEntry] {
        &self.whitelist
    }

    /// Look up a partner request by id.
    #[must_use]
    pub fn partner_request(&self, id: &RequestId) -> Option<&PartnerRequest> {
        self.partner_requests.iter().find(|r| &r.id == id)
    }

    /// Set the status of one request in place, after server confirmation.
    ///
    /// Only the matching entry's status field changes; everything else is
    /// untouched. Returns `false` if the id is unknown.
    pub fn set_request_status(&mut self, id: &RequestId, status: RequestStatus) -> bool {
        match self.partner_requests.iter_mut().find(|r| &r.id == id) {
            Some(request) => {
                request.status = status;
                true
            }
            None => false,
        }
    }

    /// Prepend a freshly created whitelist entry, after server confirmation.
    pub fn prepend_whitelist_entry(&mut self, entry: WhitelistEntry) {
        self.whitelist.insert(0, entry);
    }

    /// Remove a whitelist entry by email, after server confirmation.
    pub fn remove_whitelist_email(&mut self, email: &Email) {
        self.whitelist.retain(|entry| &entry.email != email);
    }

    // =========================================================================
    // UI state
    // =========================================================================

    /// Current search term.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Set the search term applied by all three visible selectors.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Current status filter.
    #[must_use]
    pub const fn status_filter(&self) -> StatusFilter {
        self.status_filter
    }

    /// Set the status filter for the partner-request list.
    pub const fn set_status_filter(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
    }

    /// The currently expanded row, if any.
    #[must_use]
    pub const fn expanded(&self) -> Option<&ItemId> {
        self.expanded.as_ref()
    }

    /// Toggle row expansion with single-accordion semantics.
    ///
    /// Expanding a row collapses whichever row was expanded before, across
    /// the combined request and contact lists; toggling the same row twice
    /// returns the store to the collapsed state.
    pub fn toggle_expanded(&mut self, id: impl Into<ItemId>) {
        let id = id.into();
        if self.expanded.as_ref() == Some(&id) {
            self.expanded = None;
        } else {
            self.expanded = Some(id);
        }
    }

    /// Whether a refresh is currently in flight.
    #[must_use]
    pub const fn is_refreshing(&self) -> bool {
        self.is_refreshing
    }

    /// Set the refresh-in-flight flag.
    pub const fn set_refreshing(&mut self, refreshing: bool) {
        self.is_refreshing = refreshing;
    }

    /// Current whitelist email draft.
    #[must_use]
    pub fn new_email_draft(&self) -> &str {
        &self.new_email_draft
    }

    /// Set the whitelist email draft.
    pub fn set_new_email_draft(&mut self, draft: impl Into<String>) {
        self.new_email_draft = draft.into();
    }

    /// Clear the draft and its validation error, after a confirmed add.
    pub fn clear_email_draft(&mut self) {
        self.new_email_draft.clear();
        self.email_error = None;
    }

    /// The draft's validation error, if any.
    #[must_use]
    pub fn email_error(&self) -> Option<&str> {
        self.email_error.as_deref()
    }

    /// Set or clear the draft's validation error.
    pub fn set_email_error(&mut self, error: Option<String>) {
        self.email_error = error;
    }

    // =========================================================================
    // Selectors
    // =========================================================================

    /// Partner requests passing the search term and status filter.
    ///
    /// Search matches case-insensitively against company name, contact
    /// person and email. Order is the server order.
    #[must_use]
    pub fn visible_partner_requests(&self) -> Vec<&PartnerRequest> {
        let needle = self.search_term.to_lowercase();
        self.partner_requests
            .iter()
            .filter(|r| {
                let matches_search = contains_ci(&r.company_name, &needle)
                    || contains_ci(&r.contact_person, &needle)
                    || contains_ci(r.email.as_str(), &needle);
                matches_search && self.status_filter.matches(r.status)
            })
            .collect()
    }

    /// Contacts passing the search term (name, email, subject).
    #[must_use]
    pub fn visible_contacts(&self) -> Vec<&Contact> {
        let needle = self.search_term.to_lowercase();
        self.contacts
            .iter()
            .filter(|c| {
                contains_ci(&c.name, &needle)
                    || contains_ci(c.email.as_str(), &needle)
                    || contains_ci(&c.subject, &needle)
            })
            .collect()
    }

    /// Whitelist entries passing the search term (email only).
    #[must_use]
    pub fn visible_whitelist(&self) -> Vec<&WhitelistEntry> {
        let needle = self.search_term.to_lowercase();
        self.whitelist
            .iter()
            .filter(|entry| contains_ci(entry.email.as_str(), &needle))
            .collect()
    }

    /// Summary counts, recomputed from the collections.
    #[must_use]
    pub fn stats(&self) -> DashboardStats {
        let by_status = |status| {
            self.partner_requests
                .iter()
                .filter(|r| r.status == status)
                .count()
        };

        DashboardStats {
            total_requests: self.partner_requests.len(),
            pending_requests: by_status(RequestStatus::Pending),
            approved_requests: by_status(RequestStatus::Approved),
            rejected_requests: by_status(RequestStatus::Rejected),
            total_contacts: self.contacts.len(),
        }
    }
}

/// Case-insensitive substring match; the needle is pre-lowercased.
fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || haystack.to_lowercase().contains(needle_lower)
}
