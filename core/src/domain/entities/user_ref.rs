//! User reference passed into the credential lifecycle.

use mc_shared::utils::email::mask_email;
use serde::{Deserialize, Serialize};

/// Identity of the user a challenge runs for.
///
/// `(realm, id)` keys the credential record in the store. `email_verified`
/// gates whether the code factor is offered at all - enforcement of the
/// verify-email required action lives with the surrounding session, this
/// crate only consumes the boolean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    /// Realm the user belongs to
    pub realm: String,

    /// Stable user identifier within the realm
    pub id: String,

    /// Registered email address codes are delivered to
    pub email: String,

    /// Whether the address has been verified
    pub email_verified: bool,
}

impl UserRef {
    pub fn new(
        realm: impl Into<String>,
        id: impl Into<String>,
        email: impl Into<String>,
        email_verified: bool,
    ) -> Self {
        Self {
            realm: realm.into(),
            id: id.into(),
            email: email.into(),
            email_verified,
        }
    }

    /// Email address masked for logging
    pub fn masked_email(&self) -> String {
        mask_email(&self.email)
    }
}
