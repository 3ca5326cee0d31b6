//! Error types for the credential lifecycle.
//!
//! Only storage failure is fatal for an authentication step. Recoverable
//! conditions (missing input, expiry, mismatch) are modeled as outcome
//! values, not errors, and delivery failure is surfaced as a warning value
//! by the issuing path.

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    /// Persistence unavailable; the current step cannot proceed safely
    #[error("storage failure: {message}")]
    Storage { message: String },

    /// Invariant violation or unexpected internal condition
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn storage(message: impl Into<String>) -> Self {
        DomainError::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }
}

/// Expected mail-delivery failure (bad address, transport down).
///
/// Returned as a value by the mailer; never aborts issuance.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("delivery failed: {message}")]
pub struct DeliveryError {
    pub message: String,
}

impl DeliveryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DomainError::storage("redis connection refused");
        assert_eq!(err.to_string(), "storage failure: redis connection refused");

        let warn = DeliveryError::new("mailbox does not exist");
        assert_eq!(warn.to_string(), "delivery failed: mailbox does not exist");
    }
}
