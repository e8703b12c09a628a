//! Core types for the user registry.
//!
//! This module provides type-safe wrappers for the fields of an account.

pub mod account;
pub mod email;
pub mod id;
pub mod password;
pub mod username;

pub use account::{NewAccount, ValidationError};
pub use email::{Email, EmailError};
pub use id::*;
pub use password::{Password, PasswordDigest, PasswordError};
pub use username::{Username, UsernameError};
