//! Repository interfaces consumed by the core services.

pub mod audit;
pub mod credential;

pub use audit::{AuditSink, MockAuditSink, NoOpAuditSink};
pub use credential::{CredentialStore, MockCredentialStore};
