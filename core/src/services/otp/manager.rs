//! Code credential manager implementation

use chrono::Utc;
use std::sync::Arc;

use crate::domain::entities::code_credential::CodeCredential;
use crate::domain::entities::user_ref::UserRef;
use crate::errors::DomainResult;
use crate::repositories::credential::CredentialStore;
use crate::services::code_generator::CodeGenerator;
use crate::services::expiry::{ExpiryPolicy, Freshness};

use super::config::OtpConfig;
use super::traits::Mailer;
use super::types::{IssueOutcome, ValidateOutcome};

/// Orchestrates generation, storage, and delivery of code credentials.
///
/// `issue` and `validate` are the only writers and readers of the record;
/// both are synchronous within one authentication step. Concurrent calls
/// for the same user are serialized by the surrounding session; the store's
/// idempotent upsert bounds a lost race to last-write-wins.
pub struct OtpCredentialManager<S: CredentialStore, M: Mailer> {
    /// Credential persistence
    store: Arc<S>,
    /// Out-of-band code delivery
    mailer: Arc<M>,
    /// Code generation
    generator: CodeGenerator,
    /// Service configuration
    config: OtpConfig,
}

impl<S: CredentialStore, M: Mailer> OtpCredentialManager<S, M> {
    /// Create a new manager
    pub fn new(store: Arc<S>, mailer: Arc<M>, config: OtpConfig) -> Self {
        let generator = CodeGenerator::new(config.code_length);
        Self {
            store,
            mailer,
            generator,
            config,
        }
    }

    /// Whether the code factor is offered to this user.
    ///
    /// The factor requires a verified email address; enforcing the
    /// verify-email required action is the caller's concern.
    pub fn is_configured_for(&self, user: &UserRef) -> bool {
        user.email_verified
    }

    /// Freshness of the user's current record, for callers deciding
    /// whether a challenge needs a fresh code
    pub async fn current_freshness(&self, user: &UserRef) -> DomainResult<Freshness> {
        let record = self.store.get(&user.realm, &user.id).await?;
        Ok(ExpiryPolicy::freshness(record.as_ref(), Utc::now()))
    }

    /// Generate, persist, and deliver a new code for the user.
    ///
    /// The upsert replaces any prior record, so the old value stops
    /// validating the moment the write lands. Delivery failure does not
    /// roll issuance back: the stored code is valid and the failure is
    /// surfaced as a warning for the caller to display.
    pub async fn issue(&self, user: &UserRef) -> DomainResult<IssueOutcome> {
        let prior = self.store.get(&user.realm, &user.id).await?;
        let reissued = prior.is_some();

        let code = self.generator.generate();
        let credential = CodeCredential::new(code.clone(), self.config.ttl_seconds);

        self.store.put(&user.realm, &user.id, &credential).await?;

        tracing::info!(
            realm = %user.realm,
            user = %user.id,
            email = %user.masked_email(),
            reissued,
            event = "code_issued",
            "Issued verification code"
        );

        let delivery_warning = match self.mailer.deliver_code(user, &code).await {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(
                    realm = %user.realm,
                    user = %user.id,
                    email = %user.masked_email(),
                    error = %e,
                    event = "code_delivery_failed",
                    "Code delivery failed; issued code remains valid"
                );
                Some(e.to_string())
            }
        };

        Ok(IssueOutcome {
            reissued,
            delivery_warning,
        })
    }

    /// Validate a submitted value against the stored record.
    ///
    /// Expiry is checked before any comparison, so an expired code never
    /// validates even on an exact match, and repeated submission cannot
    /// extend a code's life. The record is left untouched.
    pub async fn validate(
        &self,
        user: &UserRef,
        submitted: Option<&str>,
    ) -> DomainResult<ValidateOutcome> {
        let submitted = match submitted.map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => return Ok(ValidateOutcome::NoInput),
        };

        let record = self.store.get(&user.realm, &user.id).await?;

        match ExpiryPolicy::freshness(record.as_ref(), Utc::now()) {
            Freshness::NoRecord => {
                tracing::debug!(
                    realm = %user.realm,
                    user = %user.id,
                    event = "no_active_code",
                    "Validation requested with no active code"
                );
                Ok(ValidateOutcome::NoActiveCode)
            }
            Freshness::Expired => {
                tracing::info!(
                    realm = %user.realm,
                    user = %user.id,
                    event = "code_expired",
                    "Stored code aged out before submission"
                );
                Ok(ValidateOutcome::Expired)
            }
            Freshness::Fresh => {
                let matched = record.as_ref().is_some_and(|c| c.matches(submitted));
                if matched {
                    tracing::info!(
                        realm = %user.realm,
                        user = %user.id,
                        event = "code_validated",
                        "Submitted code matched"
                    );
                    Ok(ValidateOutcome::Valid)
                } else {
                    tracing::warn!(
                        realm = %user.realm,
                        user = %user.id,
                        event = "code_mismatch",
                        "Submitted code did not match"
                    );
                    Ok(ValidateOutcome::Invalid)
                }
            }
        }
    }

    /// Remove the user's code records entirely (factor disable).
    ///
    /// Not part of the browser flow; cancel leaves the record in place
    /// until it expires or is superseded.
    pub async fn disable(&self, user: &UserRef) -> DomainResult<()> {
        tracing::info!(
            realm = %user.realm,
            user = %user.id,
            event = "code_factor_disabled",
            "Removing code credential records"
        );
        self.store.remove(&user.realm, &user.id).await
    }

    /// Validity window applied to issued codes, in seconds
    pub fn ttl_seconds(&self) -> i64 {
        self.config.ttl_seconds
    }
}
