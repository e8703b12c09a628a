//! Domain models for the user registry.

pub mod account;

pub use account::Account;
