//! No-op implementation of AuditSink for when audit recording is not needed

use async_trait::async_trait;

use crate::domain::entities::audit::AuditEvent;
use crate::errors::DomainError;
use super::AuditSink;

/// No-op implementation of AuditSink
pub struct NoOpAuditSink;

impl NoOpAuditSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpAuditSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditSink for NoOpAuditSink {
    async fn record(&self, _event: &AuditEvent) -> Result<(), DomainError> {
        Ok(())
    }
}

// Also implement for () to allow simple type defaults
#[async_trait]
impl AuditSink for () {
    async fn record(&self, _event: &AuditEvent) -> Result<(), DomainError> {
        Ok(())
    }
}
