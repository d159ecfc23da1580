//! Neurolab Core - Shared types library.
//!
//! This crate provides common types used across all Neurolab admin components:
//! - `admin` - Console library (API client, triage store, session handling)
//! - `cli` - Command-line console for triaging partner requests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails, the partner
//!   request status machine, and the triage entities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
