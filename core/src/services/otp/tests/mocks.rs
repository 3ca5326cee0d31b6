//! Mock implementations for testing the credential manager and flow

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::entities::user_ref::UserRef;
use crate::errors::DeliveryError;
use crate::services::otp::traits::Mailer;

// Mock mailer for testing
pub struct MockMailer {
    pub sent: Arc<Mutex<HashMap<String, Vec<String>>>>,
    pub should_fail: bool,
}

impl MockMailer {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent: Arc::new(Mutex::new(HashMap::new())),
            should_fail,
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

    /// All codes delivered to the address
    pub fn codes_for(&self, email: &str) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .get(email)
            .cloned()
            .unwrap_or_default()
    }

    pub fn delivery_count(&self, email: &str) -> usize {
        self.codes_for(email).len()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn deliver_code(&self, user: &UserRef, code: &str) -> Result<(), DeliveryError> {
        if self.should_fail {
            return Err(DeliveryError::new("mail transport down"));
        }
        self.sent
            .lock()
            .unwrap()
            .entry(user.email.clone())
            .or_default()
            .push(code.to_string());
        Ok(())
    }
}
