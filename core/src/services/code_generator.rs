//! One-time-code generation.

use rand::{rngs::OsRng, RngCore};

/// Default number of decimal digits in a generated code
pub const DEFAULT_CODE_LENGTH: usize = 8;

/// Shortest code length accepted by the generator
pub const MIN_CODE_LENGTH: usize = 6;

/// Longest code length accepted by the generator
pub const MAX_CODE_LENGTH: usize = 10;

/// Generator for one-time codes.
///
/// Draws from the OS CSPRNG so outputs stay unpredictable across restarts
/// and statistically independent under concurrent calls. Codes are decimal
/// strings with leading zeros preserved.
#[derive(Debug, Clone, Copy)]
pub struct CodeGenerator {
    length: usize,
}

impl CodeGenerator {
    /// Create a generator for codes of `length` decimal digits,
    /// clamped to the supported range
    pub fn new(length: usize) -> Self {
        Self {
            length: length.clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH),
        }
    }

    /// Configured code length in digits
    pub fn length(&self) -> usize {
        self.length
    }

    /// Produce a fresh code.
    ///
    /// Rejection sampling keeps the distribution uniform over the decimal
    /// range; a modulo of a raw 64-bit draw would skew low values.
    pub fn generate(&self) -> String {
        let bound = 10u64.pow(self.length as u32);
        let zone = (u64::MAX / bound) * bound;

        let mut rng = OsRng;
        let value = loop {
            let draw = rng.next_u64();
            if draw < zone {
                break draw % bound;
            }
        };

        format!("{:0width$}", value, width = self.length)
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}
