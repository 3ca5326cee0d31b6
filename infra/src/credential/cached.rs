//! Invalidate-on-write read projection over an authoritative store.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use mc_core::domain::entities::code_credential::CodeCredential;
use mc_core::errors::DomainResult;
use mc_core::repositories::credential::CredentialStore;

/// Two-layer credential store: authoritative inner store plus a derived
/// read cache.
///
/// The cache is a projection, never the source of truth. Every mutation
/// goes to the inner store first and evicts the cached entry only after
/// the write returned, so a reader can never observe a stale hit after a
/// write (read-your-writes). Absence is cached too; the eviction on write
/// covers it the same way.
///
/// Callers get both layers behind the one `CredentialStore` interface, so
/// nothing can bypass the invalidation.
pub struct CachedCredentialStore<S: CredentialStore> {
    inner: S,
    cache: RwLock<HashMap<(String, String), Option<CodeCredential>>>,
}

impl<S: CredentialStore> CachedCredentialStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The wrapped authoritative store
    pub fn inner(&self) -> &S {
        &self.inner
    }

    async fn evict(&self, realm: &str, user_id: &str) {
        let mut cache = self.cache.write().await;
        cache.remove(&(realm.to_string(), user_id.to_string()));
    }
}

#[async_trait]
impl<S: CredentialStore> CredentialStore for CachedCredentialStore<S> {
    async fn get(&self, realm: &str, user_id: &str) -> DomainResult<Option<CodeCredential>> {
        let key = (realm.to_string(), user_id.to_string());

        {
            let cache = self.cache.read().await;
            if let Some(entry) = cache.get(&key) {
                debug!(
                    realm = realm,
                    user = user_id,
                    event = "credential_cache_hit",
                    "Serving credential read from cache"
                );
                return Ok(entry.clone());
            }
        }

        let fetched = self.inner.get(realm, user_id).await?;
        let mut cache = self.cache.write().await;
        cache.insert(key, fetched.clone());
        Ok(fetched)
    }

    async fn put(
        &self,
        realm: &str,
        user_id: &str,
        credential: &CodeCredential,
    ) -> DomainResult<()> {
        // write must be durable before the projection is dropped
        self.inner.put(realm, user_id, credential).await?;
        self.evict(realm, user_id).await;
        Ok(())
    }

    async fn remove(&self, realm: &str, user_id: &str) -> DomainResult<()> {
        self.inner.remove(realm, user_id).await?;
        self.evict(realm, user_id).await;
        Ok(())
    }
}
