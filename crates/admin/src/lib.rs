//! Neurolab Admin - console library for the Neurolab back office.
//!
//! This crate implements the admin triage workflow against the Neurolab
//! REST backend:
//!
//! - [`session`] - persisted bearer-token store (the session guard's state)
//! - [`api`] - typed HTTP client for the backend's admin endpoints
//! - [`store`] - in-memory triage state with pure filter/search selectors
//! - [`console`] - the dispatcher wiring session, client and store together
//! - [`export`] - CSV export of the triage collections
//!
//! # Architecture
//!
//! The backend owns all three collections (partner requests, contacts,
//! whitelist); the console holds cached copies. Mutations are
//! confirm-then-apply: local state changes only after the backend has
//! acknowledged the call, so a failed call leaves the previous state
//! visible.
//!
//! # Example
//!
//! ```rust,no_run
//! use neurolab_admin::{AdminConsole, Config, session::FileSessionStore};
//!
//! # async fn run() -> Result<(), neurolab_admin::ConsoleError> {
//! let config = Config::from_env()?;
//! let session = FileSessionStore::new(config.token_file.clone());
//! let mut console = AdminConsole::new(&config, session)?;
//!
//! console.load_all().await?;
//! for request in console.store().visible_partner_requests() {
//!     tracing::info!("{} - {}", request.company_name, request.status);
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod console;
pub mod error;
pub mod export;
pub mod session;
pub mod store;

pub use api::{ApiClient, ApiError};
pub use config::{Config, ConfigError};
pub use console::AdminConsole;
pub use error::ConsoleError;
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
pub use store::{DashboardStats, StatusFilter, TriageStore};
