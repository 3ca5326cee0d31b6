//! Shared utilities and common types for the MailCode server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Utility functions (email validation, masking)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AppConfig, CacheConfig, Environment, LoggingConfig, SmtpConfig};
pub use utils::email;
