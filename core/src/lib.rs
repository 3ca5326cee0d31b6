//! # MailCode Core
//!
//! Core business logic and domain layer for the MailCode backend.
//! This crate contains domain entities, the credential lifecycle services,
//! repository interfaces, and error types that form the foundation of the
//! email one-time-code step-up authentication flow.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
