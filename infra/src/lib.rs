//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the MailCode
//! application. It provides concrete implementations for credential
//! persistence, read caching, and outbound email delivery.
//!
//! ## Architecture
//!
//! - **Cache**: Redis client used by the credential store
//! - **Credential**: store implementations (Redis, in-memory, cached projection)
//! - **Email**: SMTP mailer and mock delivery for development

// Re-export core error types for convenience
pub use mc_core::errors::*;

/// Cache module - Redis client and operations
pub mod cache;

/// Credential store implementations
pub mod credential;

/// Email delivery module
pub mod email;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis connection or command error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// SMTP transport construction error
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
