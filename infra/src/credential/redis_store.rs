//! Redis-backed authoritative credential store.

use async_trait::async_trait;
use tracing::{debug, info};

use mc_core::domain::entities::code_credential::{CodeCredential, CredentialKind};
use mc_core::errors::{DomainError, DomainResult};
use mc_core::repositories::credential::CredentialStore;

use crate::cache::RedisClient;

/// Extra seconds the record outlives its validity window in Redis.
///
/// Staleness is computed from `issued_at` at read time; the physical TTL
/// only garbage-collects records nobody will overwrite. The slack keeps a
/// record readable right at the logical boundary.
const PHYSICAL_TTL_SLACK_SECONDS: i64 = 60;

/// Credential store persisting records as JSON in Redis.
///
/// One key per (realm, user, kind) identity, so an upsert is a plain SET
/// and the single-active-record invariant holds under concurrent writers
/// (last write wins, never a duplicate).
#[derive(Clone)]
pub struct RedisCredentialStore {
    client: RedisClient,
}

impl RedisCredentialStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn format_key(realm: &str, user_id: &str) -> String {
        format!("credential:{}:{}:{}", CredentialKind::Code, realm, user_id)
    }
}

#[async_trait]
impl CredentialStore for RedisCredentialStore {
    async fn get(&self, realm: &str, user_id: &str) -> DomainResult<Option<CodeCredential>> {
        let key = Self::format_key(realm, user_id);
        let raw = self
            .client
            .get(&key)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        match raw {
            None => Ok(None),
            Some(json) => {
                let credential = serde_json::from_str(&json).map_err(|e| {
                    DomainError::storage(format!("corrupt credential record at {}: {}", key, e))
                })?;
                Ok(Some(credential))
            }
        }
    }

    async fn put(
        &self,
        realm: &str,
        user_id: &str,
        credential: &CodeCredential,
    ) -> DomainResult<()> {
        let key = Self::format_key(realm, user_id);
        let json = serde_json::to_string(credential)
            .map_err(|e| DomainError::internal(format!("serialize credential: {}", e)))?;

        let physical_ttl = (credential.ttl_seconds + PHYSICAL_TTL_SLACK_SECONDS).max(1) as u64;
        self.client
            .set_with_expiry(&key, &json, physical_ttl)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        info!(
            realm = realm,
            user = user_id,
            event = "credential_stored",
            "Stored code credential record"
        );
        Ok(())
    }

    async fn remove(&self, realm: &str, user_id: &str) -> DomainResult<()> {
        let key = Self::format_key(realm, user_id);
        self.client
            .delete(&key)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        debug!(
            realm = realm,
            user = user_id,
            event = "credential_removed",
            "Removed code credential records"
        );
        Ok(())
    }
}
