//! Recording mock implementation of AuditSink for tests.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::entities::audit::{AuditAction, AuditEvent};
use crate::errors::{DomainError, DomainResult};
use super::AuditSink;

/// Mock audit sink that captures recorded events
pub struct MockAuditSink {
    events: Arc<Mutex<Vec<AuditEvent>>>,
    pub should_fail: bool,
}

impl MockAuditSink {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            should_fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    /// All events recorded so far
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Number of events with the given action
    pub fn count(&self, action: AuditAction) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.action == action)
            .count()
    }
}

impl Default for MockAuditSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditSink for MockAuditSink {
    async fn record(&self, event: &AuditEvent) -> DomainResult<()> {
        if self.should_fail {
            return Err(DomainError::internal("mock audit sink unavailable"));
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}
