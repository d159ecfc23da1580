//! The admin console: session guard, data fetcher and action dispatcher.
//!
//! [`AdminConsole`] wires the three pieces of the triage workflow together:
//! the [`SessionStore`] holding the bearer token, the [`ApiClient`] talking
//! to the backend, and the [`TriageStore`] caching the collections and UI
//! state.
//!
//! Every mutation is confirm-then-apply: the cached state changes only
//! after the backend acknowledged the call. The mutating methods take
//! `&mut self`, which statically serializes them - a second mutation cannot
//! start while one is in flight, so duplicate submissions for the same
//! entity are impossible from a single console instance.

use neurolab_core::{Email, RequestId, TriageDecision};
use secrecy::SecretString;

use crate::api::{ApiClient, ApiError};
use crate::config::Config;
use crate::error::ConsoleError;
use crate::session::SessionStore;
use crate::store::TriageStore;

/// Generic message shown when a whitelist add fails without a server
/// explanation.
const WHITELIST_ADD_FALLBACK: &str = "Failed to add email to whitelist";

/// The admin triage console.
pub struct AdminConsole<S: SessionStore> {
    api: ApiClient,
    session: S,
    store: TriageStore,
}

impl<S: SessionStore> AdminConsole<S> {
    /// Create a console for the backend in `config`, using `session` as the
    /// single accessor for the persisted bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &Config, session: S) -> Result<Self, ConsoleError> {
        Ok(Self {
            api: ApiClient::new(config)?,
            session,
            store: TriageStore::new(),
        })
    }

    /// The cached collections and UI state.
    #[must_use]
    pub const fn store(&self) -> &TriageStore {
        &self.store
    }

    /// Mutable access to UI state (search term, filter, expansion, draft).
    pub const fn store_mut(&mut self) -> &mut TriageStore {
        &mut self.store
    }

    // =========================================================================
    // Session guard
    // =========================================================================

    /// Whether a session token is currently stored.
    ///
    /// Presence only - validity is discovered reactively via a 401.
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        self.session.load().is_ok_and(|token| token.is_some())
    }

    /// Read the stored token or fail with [`ConsoleError::NotSignedIn`].
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::NotSignedIn`] when no token is stored, or a
    /// session-storage error if the store cannot be read.
    pub fn require_session(&self) -> Result<SecretString, ConsoleError> {
        self.session.load()?.ok_or(ConsoleError::NotSignedIn)
    }

    /// Exchange admin credentials for a bearer token and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidCredentials`] when the backend rejects
    /// the credentials, or any transport/storage error otherwise.
    pub async fn login(
        &mut self,
        email: &Email,
        password: &SecretString,
    ) -> Result<(), ConsoleError> {
        let token = self.api.login(email, password).await.map_err(|e| {
            if e.is_unauthorized() {
                ConsoleError::InvalidCredentials
            } else {
                ConsoleError::Api(e)
            }
        })?;

        self.session.save(&token)?;
        tracing::info!("signed in as {email}");
        Ok(())
    }

    /// Drop the local session.
    ///
    /// Purely local: no network call is involved, so logout can never be
    /// blocked by backend or connectivity failures.
    ///
    /// # Errors
    ///
    /// Returns an error only if the session storage itself cannot be
    /// modified.
    pub fn logout(&mut self) -> Result<(), ConsoleError> {
        self.session.clear()?;
        tracing::info!("signed out");
        Ok(())
    }

    // =========================================================================
    // Data fetcher
    // =========================================================================

    /// Fetch all three collections and replace the cached copies.
    ///
    /// The three GETs run concurrently. Partner requests are the dashboard's
    /// primary artifact: their failure aborts the load. Contacts and
    /// whitelist degrade to empty collections on failure, with a warning
    /// logged, so the rest of the dashboard still renders.
    ///
    /// UI state (search, filter, expansion, draft) is never touched.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Unauthorized`] (after clearing the stored
    /// token) if any call came back 401, or
    /// [`ConsoleError::LoadFailed`] if the partner-requests call failed.
    pub async fn load_all(&mut self) -> Result<(), ConsoleError> {
        let token = self.require_session()?;

        let (requests, contacts, whitelist) = tokio::join!(
            self.api.list_partner_requests(&token),
            self.api.list_contacts(&token),
            self.api.list_whitelist(&token),
        );

        // A 401 from any of the three calls invalidates the session as a
        // whole, before the fatal/non-fatal policy is applied.
        for error in [
            requests.as_ref().err(),
            contacts.as_ref().err(),
            whitelist.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        {
            if error.is_unauthorized() {
                return Err(self.invalidate_session());
            }
        }

        let requests = requests.map_err(ConsoleError::LoadFailed)?;

        let contacts = contacts.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to fetch contacts, rendering empty");
            Vec::new()
        });
        let whitelist = whitelist.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to fetch whitelist, rendering empty");
            Vec::new()
        });

        self.store.set_collections(requests, contacts, whitelist);
        Ok(())
    }

    /// Re-run the full fetch with the refreshing flag raised.
    ///
    /// Search and filter state survive a refresh.
    ///
    /// # Errors
    ///
    /// Propagates [`load_all`](Self::load_all) errors; the refreshing flag
    /// is lowered either way.
    pub async fn refresh(&mut self) -> Result<(), ConsoleError> {
        self.store.set_refreshing(true);
        let result = self.load_all().await;
        self.store.set_refreshing(false);
        result
    }

    // =========================================================================
    // Triage actions
    // =========================================================================

    /// Approve a pending partner request.
    ///
    /// # Errors
    ///
    /// See [`decide`](Self::decide).
    pub async fn approve(&mut self, id: &RequestId) -> Result<(), ConsoleError> {
        self.decide(id, TriageDecision::Approve).await
    }

    /// Reject a pending partner request.
    ///
    /// # Errors
    ///
    /// See [`decide`](Self::decide).
    pub async fn reject(&mut self, id: &RequestId) -> Result<(), ConsoleError> {
        self.decide(id, TriageDecision::Reject).await
    }

    /// Apply a triage decision to a pending request.
    ///
    /// The transition is validated locally first: deciding a request that is
    /// no longer pending is refused without a network call. On backend
    /// confirmation, only the matching entry's status changes in the cached
    /// collection; on failure the previous status stays visible.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::UnknownRequest`] for an id the store does not
    /// hold, [`ConsoleError::AlreadyDecided`] for a non-pending request, or
    /// an auth/API error from the backend call.
    pub async fn decide(
        &mut self,
        id: &RequestId,
        decision: TriageDecision,
    ) -> Result<(), ConsoleError> {
        let request = self
            .store
            .partner_request(id)
            .ok_or_else(|| ConsoleError::UnknownRequest(id.clone()))?;
        let target = request.status.apply(decision)?;

        let token = self.require_session()?;
        self.api
            .update_request_status(&token, id, decision)
            .await
            .map_err(|e| self.map_authorized_error(e))?;

        self.store.set_request_status(id, target);
        tracing::info!(request = %id, status = %target, "partner request updated");
        Ok(())
    }

    /// Submit the whitelist email draft.
    ///
    /// The draft is validated before any network call; a validation or
    /// backend failure records a field-level error on the draft and leaves
    /// the whitelist collection untouched. On success the created entry is
    /// prepended and the draft cleared.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidEmail`] for an unparseable draft, or
    /// an auth/API error from the backend call.
    pub async fn add_to_whitelist(&mut self) -> Result<(), ConsoleError> {
        self.store.set_email_error(None);

        let email = match Email::parse(self.store.new_email_draft()) {
            Ok(email) => email,
            Err(e) => {
                self.store.set_email_error(Some(e.to_string()));
                return Err(e.into());
            }
        };

        let token = self.require_session()?;
        match self.api.add_whitelist_entry(&token, &email).await {
            Ok(entry) => {
                self.store.prepend_whitelist_entry(entry);
                self.store.clear_email_draft();
                Ok(())
            }
            Err(e) if e.is_unauthorized() => Err(self.invalidate_session()),
            Err(e) => {
                let message = match &e {
                    ApiError::Api { message, .. } => message.clone(),
                    _ => WHITELIST_ADD_FALLBACK.to_owned(),
                };
                self.store.set_email_error(Some(message));
                Err(e.into())
            }
        }
    }

    /// Remove an address from the whitelist.
    ///
    /// The cached entry is removed only after the backend confirmed the
    /// delete; on failure the entry stays visible.
    ///
    /// # Errors
    ///
    /// Returns an auth/API error from the backend call.
    pub async fn remove_from_whitelist(&mut self, email: &Email) -> Result<(), ConsoleError> {
        let token = self.require_session()?;
        self.api
            .remove_whitelist_entry(&token, email)
            .await
            .map_err(|e| self.map_authorized_error(e))?;

        self.store.remove_whitelist_email(email);
        tracing::info!(%email, "whitelist entry removed");
        Ok(())
    }

    // =========================================================================
    // Error mapping
    // =========================================================================

    /// Map an error from an authorized call, invalidating the session on
    /// 401.
    fn map_authorized_error(&self, error: ApiError) -> ConsoleError {
        if error.is_unauthorized() {
            self.invalidate_session()
        } else {
            ConsoleError::Api(error)
        }
    }

    /// Clear the stored token after the backend rejected it.
    ///
    /// Unauthorized is fatal to the session: no further authorized call can
    /// proceed until a fresh login stores a new token.
    fn invalidate_session(&self) -> ConsoleError {
        if let Err(e) = self.session.clear() {
            tracing::error!(error = %e, "failed to clear rejected session token");
        } else {
            tracing::warn!("session rejected by backend, token cleared");
        }
        ConsoleError::Unauthorized
    }
}

impl<S: SessionStore> std::fmt::Debug for AdminConsole<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConsole")
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}
