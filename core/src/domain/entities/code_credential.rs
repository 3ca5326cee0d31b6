//! Code credential entity for email-based step-up authentication.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};

/// Default validity window for an issued code (5 minutes)
pub const DEFAULT_TTL_SECONDS: i64 = 300;

/// Kind tag for credential records sharing the per-user credential
/// collection. Password and TOTP records use other kinds in the same store;
/// only `Code` is handled by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialKind {
    Code,
}

impl CredentialKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialKind::Code => "code",
        }
    }
}

impl std::fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The persisted one-time-code credential for a user.
///
/// At most one record of kind `code` exists per (realm, user) at any time;
/// the store enforces this by upserting on the identity key. A record past
/// its validity window is semantically expired even while still present in
/// storage - staleness is computed, never enforced by deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeCredential {
    /// Credential kind tag
    pub kind: CredentialKind,

    /// The current code value (opaque text, exact match)
    pub value: String,

    /// Timestamp the value was (re)generated
    pub issued_at: DateTime<Utc>,

    /// Validity window length for this record in seconds
    pub ttl_seconds: i64,
}

impl CodeCredential {
    /// Creates a code credential issued now
    pub fn new(value: String, ttl_seconds: i64) -> Self {
        Self {
            kind: CredentialKind::Code,
            value,
            issued_at: Utc::now(),
            ttl_seconds,
        }
    }

    /// Timestamp after which the record no longer validates
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.issued_at + Duration::seconds(self.ttl_seconds)
    }

    /// Checks whether the record is expired at `now`.
    ///
    /// The comparison is strict: a submission at exactly `ttl_seconds`
    /// after issuance is still valid.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now - self.issued_at > Duration::seconds(self.ttl_seconds)
    }

    /// Compares a submitted value against the stored one.
    ///
    /// Exact, full-length, constant-time comparison. Callers must check
    /// expiry first; an expired code must never be compared.
    pub fn matches(&self, submitted: &str) -> bool {
        if self.value.len() != submitted.len() {
            return false;
        }
        constant_time_eq(self.value.as_bytes(), submitted.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_credential() {
        let cred = CodeCredential::new("12345678".to_string(), 300);
        assert_eq!(cred.kind, CredentialKind::Code);
        assert_eq!(cred.value, "12345678");
        assert_eq!(cred.ttl_seconds, 300);
        assert_eq!(cred.expires_at(), cred.issued_at + Duration::seconds(300));
    }

    #[test]
    fn test_expiry_boundary_is_strict() {
        let cred = CodeCredential::new("12345678".to_string(), 300);

        // at exactly ttl the record is still valid
        assert!(!cred.is_expired_at(cred.issued_at + Duration::seconds(300)));
        assert!(!cred.is_expired_at(cred.issued_at + Duration::seconds(299)));
        assert!(cred.is_expired_at(cred.issued_at + Duration::seconds(301)));
    }

    #[test]
    fn test_matches_is_exact_and_case_sensitive() {
        let cred = CodeCredential::new("a1B2c3D4".to_string(), 300);
        assert!(cred.matches("a1B2c3D4"));
        assert!(!cred.matches("A1b2C3d4"));
        assert!(!cred.matches("a1B2c3D"));
        assert!(!cred.matches("a1B2c3D4x"));
        assert!(!cred.matches(""));
    }

    #[test]
    fn test_kind_serializes_as_tag() {
        let cred = CodeCredential::new("12345678".to_string(), 60);
        let json = serde_json::to_string(&cred).unwrap();
        assert!(json.contains("\"kind\":\"code\""));

        let back: CodeCredential = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cred);
    }
}
