//! Partner request status machine.
//!
//! A partner request arrives `pending` and is moved exactly once, by an
//! admin decision, to `approved` or `rejected`. Both outcomes are terminal:
//! no operation in the console leaves them.

use serde::{Deserialize, Serialize};

/// Review status of a partner request, as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting an admin decision.
    #[default]
    Pending,
    /// Accepted by an admin. Terminal.
    Approved,
    /// Declined by an admin. Terminal.
    Rejected,
}

impl RequestStatus {
    /// Whether this status accepts no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// The status label the backend uses on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Apply a triage decision to this status.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError`] if the status is not `Pending`: once a
    /// request has been decided it cannot be decided again.
    pub fn apply(self, decision: TriageDecision) -> Result<Self, TransitionError> {
        match self {
            Self::Pending => Ok(decision.target()),
            current => Err(TransitionError {
                current,
                attempted: decision,
            }),
        }
    }
}

impl core::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An admin's decision on a pending partner request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriageDecision {
    /// Accept the partnership request.
    Approve,
    /// Decline the partnership request.
    Reject,
}

impl TriageDecision {
    /// The terminal status this decision moves a pending request to.
    #[must_use]
    pub const fn target(self) -> RequestStatus {
        match self {
            Self::Approve => RequestStatus::Approved,
            Self::Reject => RequestStatus::Rejected,
        }
    }
}

impl core::fmt::Display for TriageDecision {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        })
    }
}

/// A triage decision was attempted on a request that is no longer pending.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot {attempted} a request that is already {current}")]
pub struct TransitionError {
    /// Status the request currently has.
    pub current: RequestStatus,
    /// Decision that was refused.
    pub attempted: TriageDecision,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_accepts_both_decisions() {
        assert_eq!(
            RequestStatus::Pending.apply(TriageDecision::Approve).unwrap(),
            RequestStatus::Approved
        );
        assert_eq!(
            RequestStatus::Pending.apply(TriageDecision::Reject).unwrap(),
            RequestStatus::Rejected
        );
    }

    #[test]
    fn test_terminal_states_refuse_decisions() {
        for status in [RequestStatus::Approved, RequestStatus::Rejected] {
            for decision in [TriageDecision::Approve, TriageDecision::Reject] {
                let err = status.apply(decision).unwrap_err();
                assert_eq!(err.current, status);
                assert_eq!(err.attempted, decision);
            }
        }
    }

    #[test]
    fn test_terminality() {
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(RequestStatus::Approved.is_terminal());
        assert!(RequestStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_wire_format_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&RequestStatus::Pending).unwrap(),
            r#""pending""#
        );
        let status: RequestStatus = serde_json::from_str(r#""rejected""#).unwrap();
        assert_eq!(status, RequestStatus::Rejected);

        assert_eq!(
            serde_json::to_string(&TriageDecision::Approve.target()).unwrap(),
            r#""approved""#
        );
    }

    #[test]
    fn test_transition_error_message() {
        let err = RequestStatus::Approved
            .apply(TriageDecision::Reject)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot reject a request that is already approved"
        );
    }
}
