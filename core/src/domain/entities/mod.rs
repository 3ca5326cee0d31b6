//! Domain entities.

pub mod audit;
pub mod code_credential;
pub mod user_ref;

pub use audit::{AuditAction, AuditEvent};
pub use code_credential::{CodeCredential, CredentialKind, DEFAULT_TTL_SECONDS};
pub use user_ref::UserRef;
