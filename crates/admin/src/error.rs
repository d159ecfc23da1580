//! Unified error handling for the admin console.

use neurolab_core::{EmailError, RequestId, TransitionError};
use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::session::SessionError;

/// Application-level error type for the admin console.
///
/// The taxonomy mirrors how the dashboard reacts:
/// - auth errors ([`NotSignedIn`](Self::NotSignedIn),
///   [`Unauthorized`](Self::Unauthorized)) are fatal to the session and
///   send the admin back to login;
/// - a failed partner-requests fetch ([`LoadFailed`](Self::LoadFailed))
///   is fatal to the whole view;
/// - mutation errors are localized and leave the cached state untouched.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The session store could not be read or written.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// No stored token; the admin must log in first.
    #[error("Not signed in - run login first")]
    NotSignedIn,

    /// The backend rejected the token; the stored session has been cleared.
    #[error("Session expired - log in again")]
    Unauthorized,

    /// Login was rejected by the backend.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The primary partner-requests fetch failed, so the dashboard cannot
    /// render at all.
    #[error("Failed to load partner requests: {0}")]
    LoadFailed(#[source] ApiError),

    /// A mutating call failed; no local state was changed.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// A triage action referenced a request id the store does not hold.
    #[error("Unknown partner request: {0}")]
    UnknownRequest(RequestId),

    /// A triage decision was refused because the request is no longer
    /// pending.
    #[error("{0}")]
    AlreadyDecided(#[from] TransitionError),

    /// The whitelist email draft failed validation; the error is also
    /// recorded on the store's draft state.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),
}

#[cfg(test)]
mod tests {
    use neurolab_core::{RequestStatus, TriageDecision};

    use super::*;

    #[test]
    fn test_messages_name_the_recovery_path() {
        assert_eq!(
            ConsoleError::NotSignedIn.to_string(),
            "Not signed in - run login first"
        );
        assert_eq!(
            ConsoleError::Unauthorized.to_string(),
            "Session expired - log in again"
        );
    }

    #[test]
    fn test_transition_error_converts() {
        let err: ConsoleError = RequestStatus::Approved
            .apply(TriageDecision::Approve)
            .unwrap_err()
            .into();
        assert!(matches!(err, ConsoleError::AlreadyDecided(_)));
    }
}
