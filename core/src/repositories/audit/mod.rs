//! Audit sink repository module.

mod r#trait;
pub use r#trait::AuditSink;

mod noop;
pub use noop::NoOpAuditSink;

mod mock;
pub use mock::MockAuditSink;
