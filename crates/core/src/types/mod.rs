//! Core types for the Neurolab admin console.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod entities;
pub mod id;
pub mod status;

pub use email::{Email, EmailError};
pub use entities::{Contact, PartnerRequest, WhitelistEntry};
pub use id::*;
pub use status::{RequestStatus, TriageDecision, TransitionError};
