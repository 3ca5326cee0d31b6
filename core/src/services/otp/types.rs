//! Result types for issue and validate operations

/// Result of issuing a code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueOutcome {
    /// Whether a prior record was overwritten (resend or expiry reissue)
    pub reissued: bool,
    /// Non-fatal delivery warning; the code is stored and valid regardless
    pub delivery_warning: Option<String>,
}

/// Result of validating a submitted code.
///
/// Everything except `Valid` leaves the caller in the challenge; none of
/// these are errors. Validation never consumes or mutates the record - a
/// code stays valid for repeated attempts until it expires or a resend
/// supersedes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidateOutcome {
    /// Submitted value matched the stored, unexpired code
    Valid,
    /// A fresh code exists but the submitted value did not match
    Invalid,
    /// The stored record aged past its validity window
    Expired,
    /// No code record exists for the user
    NoActiveCode,
    /// Nothing was submitted; no attempt is consumed
    NoInput,
}

impl ValidateOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidateOutcome::Valid)
    }

    /// Whether the caller should issue a fresh code before re-prompting
    pub fn requires_reissue(&self) -> bool {
        matches!(self, ValidateOutcome::Expired | ValidateOutcome::NoActiveCode)
    }
}
