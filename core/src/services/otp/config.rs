//! Configuration for the code credential manager

use crate::domain::entities::code_credential::DEFAULT_TTL_SECONDS;
use crate::services::code_generator::DEFAULT_CODE_LENGTH;

/// Configuration for the code credential manager
#[derive(Debug, Clone)]
pub struct OtpConfig {
    /// Validity window for an issued code in seconds
    pub ttl_seconds: i64,
    /// Number of decimal digits in a generated code
    pub code_length: usize,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_TTL_SECONDS,
            code_length: DEFAULT_CODE_LENGTH,
        }
    }
}

impl OtpConfig {
    /// Config with a custom validity window
    pub fn with_ttl(ttl_seconds: i64) -> Self {
        Self {
            ttl_seconds,
            ..Default::default()
        }
    }
}
