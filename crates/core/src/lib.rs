//! User Registry Core - Shared account types.
//!
//! This crate provides the types used by every user registry component:
//! - `api` - JSON-over-HTTP front-end
//! - `cli` - Interactive console front-end
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP. Both front-ends validate input through the same
//! [`NewAccount::parse`] so they reject exactly the same registrations.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for account IDs, usernames, emails and passwords

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
