//! Collaborator traits for code delivery

use async_trait::async_trait;

use crate::domain::entities::user_ref::UserRef;
use crate::errors::DeliveryError;

/// Out-of-band delivery of a code to the user's registered address.
///
/// Expected failures (bad address, transport down) come back as a
/// `DeliveryError` value; implementations must not panic for them.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver `code` to the user's registered email address
    async fn deliver_code(&self, user: &UserRef, code: &str) -> Result<(), DeliveryError>;
}
