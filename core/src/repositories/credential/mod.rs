//! Credential store repository module.

mod r#trait;
pub use r#trait::CredentialStore;

mod mock;
pub use mock::MockCredentialStore;
