//! Business logic services.
//!
//! Services sit between the front-ends and the repository layer.

pub mod registration;

pub use registration::{RegistrationError, RegistrationService};
