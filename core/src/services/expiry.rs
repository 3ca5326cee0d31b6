//! Freshness computation for stored code records.

use chrono::{DateTime, Utc};

use crate::domain::entities::code_credential::CodeCredential;

/// Three-valued freshness of a user's code record.
///
/// `NoRecord` is distinct from `Expired` on purpose: both force the caller
/// to issue a fresh code, but "no record yet" is not the same statement as
/// "a record aged out", and the flow renders them differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// A record exists and is within its validity window
    Fresh,
    /// A record exists but aged past its validity window
    Expired,
    /// No record exists for the user yet
    NoRecord,
}

impl Freshness {
    /// Whether the caller must issue a fresh code before validating
    pub fn requires_issue(&self) -> bool {
        matches!(self, Freshness::Expired | Freshness::NoRecord)
    }
}

/// Decides fresh vs. expired from a record's issuance time and TTL.
///
/// Expiry is computed lazily at read time, never by a background sweep; a
/// record past its window stays in storage until overwritten or removed.
/// `issued_at` and `now` must come from the same clock domain (server UTC).
pub struct ExpiryPolicy;

impl ExpiryPolicy {
    /// Compute freshness of `record` at `now`.
    ///
    /// The window comparison is strict: a record is expired only when
    /// strictly more than `ttl_seconds` have elapsed since issuance.
    pub fn freshness(record: Option<&CodeCredential>, now: DateTime<Utc>) -> Freshness {
        match record {
            None => Freshness::NoRecord,
            Some(cred) if cred.is_expired_at(now) => Freshness::Expired,
            Some(_) => Freshness::Fresh,
        }
    }
}
