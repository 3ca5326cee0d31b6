//! Mock mailer recording deliveries instead of sending them.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::info;

use mc_core::domain::entities::user_ref::UserRef;
use mc_core::errors::DeliveryError;
use mc_core::services::otp::Mailer;

/// Mailer for development and tests.
///
/// Records every delivered code per address; `fail_delivery` simulates a
/// broken transport.
pub struct MockMailer {
    sent: Arc<Mutex<HashMap<String, Vec<String>>>>,
    pub fail_delivery: bool,
}

impl MockMailer {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(HashMap::new())),
            fail_delivery: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_delivery: true,
            ..Self::new()
        }
    }

    /// Last code delivered to the address, if any
    pub fn last_code(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .get(email)
            .and_then(|codes| codes.last().cloned())
    }

    /// Number of deliveries to the address
    pub fn delivery_count(&self, email: &str) -> usize {
        self.sent
            .lock()
            .unwrap()
            .get(email)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn deliver_code(&self, user: &UserRef, code: &str) -> Result<(), DeliveryError> {
        if self.fail_delivery {
            return Err(DeliveryError::new("mock transport failure"));
        }
        self.sent
            .lock()
            .unwrap()
            .entry(user.email.clone())
            .or_default()
            .push(code.to_string());
        info!(
            email = %user.masked_email(),
            event = "mock_mail_recorded",
            "Recorded code delivery"
        );
        Ok(())
    }
}
