//! Audit sink trait for recording challenge events.

use async_trait::async_trait;

use crate::domain::entities::audit::AuditEvent;
use crate::errors::DomainError;

/// Sink for invalid-attempt and code-resent events.
///
/// Recording is best-effort from the flow's perspective: a failing sink is
/// logged and never blocks authentication.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Record a single event
    async fn record(&self, event: &AuditEvent) -> Result<(), DomainError>;
}
