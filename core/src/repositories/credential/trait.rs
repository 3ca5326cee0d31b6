//! Credential store trait defining the persistence contract for code records.

use async_trait::async_trait;

use crate::domain::entities::code_credential::CodeCredential;
use crate::errors::DomainResult;

/// Persistence contract for the per-user code credential record.
///
/// Implementations own the single-active-record invariant: at most one
/// `code` record exists per (realm, user) at any time, under concurrent
/// writers included. Upserts are idempotent per identity - last write wins
/// on value and issuance time, but no duplicate record may ever be created.
///
/// Reads must be strongly consistent with the same session's prior writes
/// (read-your-writes). Implementations that keep a derived read cache must
/// invalidate it as part of the mutating call, no earlier than the write is
/// durable, so no reader observes a stale hit after a write.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fetch the single active code record for the user, if any
    async fn get(&self, realm: &str, user_id: &str) -> DomainResult<Option<CodeCredential>>;

    /// Upsert the code record for the user
    async fn put(&self, realm: &str, user_id: &str, credential: &CodeCredential)
        -> DomainResult<()>;

    /// Delete all code records for the user (factor disable path)
    async fn remove(&self, realm: &str, user_id: &str) -> DomainResult<()>;
}
