//! In-memory mock credential store for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::entities::code_credential::CodeCredential;
use crate::errors::{DomainError, DomainResult};
use super::CredentialStore;

/// Mock credential store backed by a HashMap.
///
/// The map key is the (realm, user) identity, so the single-active-record
/// invariant holds by construction. A `should_fail` flag simulates an
/// unavailable backend for storage-failure paths.
pub struct MockCredentialStore {
    records: Arc<Mutex<HashMap<(String, String), CodeCredential>>>,
    puts: AtomicUsize,
    gets: AtomicUsize,
    pub should_fail: bool,
}

impl MockCredentialStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            puts: AtomicUsize::new(0),
            gets: AtomicUsize::new(0),
            should_fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    /// Seed a record directly, bypassing the trait (e.g. with a backdated
    /// issuance time for expiry tests)
    pub fn insert(&self, realm: &str, user_id: &str, credential: CodeCredential) {
        self.records
            .lock()
            .unwrap()
            .insert((realm.to_string(), user_id.to_string()), credential);
    }

    /// Current record for the user, if any
    pub fn stored(&self, realm: &str, user_id: &str) -> Option<CodeCredential> {
        self.records
            .lock()
            .unwrap()
            .get(&(realm.to_string(), user_id.to_string()))
            .cloned()
    }

    /// Total number of records across all users
    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// Number of `put` calls observed
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    /// Number of `get` calls observed
    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }
}

impl Default for MockCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for MockCredentialStore {
    async fn get(&self, realm: &str, user_id: &str) -> DomainResult<Option<CodeCredential>> {
        if self.should_fail {
            return Err(DomainError::storage("mock store unavailable"));
        }
        self.gets.fetch_add(1, Ordering::SeqCst);
        Ok(self.stored(realm, user_id))
    }

    async fn put(
        &self,
        realm: &str,
        user_id: &str,
        credential: &CodeCredential,
    ) -> DomainResult<()> {
        if self.should_fail {
            return Err(DomainError::storage("mock store unavailable"));
        }
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.insert(realm, user_id, credential.clone());
        Ok(())
    }

    async fn remove(&self, realm: &str, user_id: &str) -> DomainResult<()> {
        if self.should_fail {
            return Err(DomainError::storage("mock store unavailable"));
        }
        self.records
            .lock()
            .unwrap()
            .remove(&(realm.to_string(), user_id.to_string()));
        Ok(())
    }
}
