//! In-memory credential store for development and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use mc_core::domain::entities::code_credential::CodeCredential;
use mc_core::errors::DomainResult;
use mc_core::repositories::credential::CredentialStore;

/// Credential store backed by a process-local map.
///
/// The map is keyed by (realm, user), so the single-active-record
/// invariant holds by construction and concurrent upserts degrade to
/// last-write-wins without duplication.
pub struct InMemoryCredentialStore {
    records: RwLock<HashMap<(String, String), CodeCredential>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn get(&self, realm: &str, user_id: &str) -> DomainResult<Option<CodeCredential>> {
        let records = self.records.read().await;
        Ok(records
            .get(&(realm.to_string(), user_id.to_string()))
            .cloned())
    }

    async fn put(
        &self,
        realm: &str,
        user_id: &str,
        credential: &CodeCredential,
    ) -> DomainResult<()> {
        let mut records = self.records.write().await;
        records.insert(
            (realm.to_string(), user_id.to_string()),
            credential.clone(),
        );
        Ok(())
    }

    async fn remove(&self, realm: &str, user_id: &str) -> DomainResult<()> {
        let mut records = self.records.write().await;
        records.remove(&(realm.to_string(), user_id.to_string()));
        Ok(())
    }
}
