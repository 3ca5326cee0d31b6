//! Audit events emitted by the challenge flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user_ref::UserRef;

/// Action recorded against a user during a challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// A fresh code was submitted and did not match
    InvalidAttempt,
    /// The user requested a new code be sent
    CodeResent,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::InvalidAttempt => "invalid_attempt",
            AuditAction::CodeResent => "code_resent",
        }
    }
}

/// A single audit record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Unique event identifier
    pub id: Uuid,

    /// Realm of the user the event concerns
    pub realm: String,

    /// User the event concerns
    pub user_id: String,

    /// What happened
    pub action: AuditAction,

    /// When the event was recorded
    pub created_at: DateTime<Utc>,
}

impl AuditEvent {
    fn new(user: &UserRef, action: AuditAction) -> Self {
        Self {
            id: Uuid::new_v4(),
            realm: user.realm.clone(),
            user_id: user.id.clone(),
            action,
            created_at: Utc::now(),
        }
    }

    /// Event for a wrong code submitted while a fresh code was active
    pub fn invalid_attempt(user: &UserRef) -> Self {
        Self::new(user, AuditAction::InvalidAttempt)
    }

    /// Event for a user-requested resend
    pub fn code_resent(user: &UserRef) -> Self {
        Self::new(user, AuditAction::CodeResent)
    }
}
