//! Business services for the code credential lifecycle.

pub mod challenge;
pub mod code_generator;
pub mod expiry;
pub mod otp;

pub use challenge::{ChallengeFlow, ChallengeRenderer, FlowResponse, FlowState, Notice, NoticeKind, PlainTextRenderer, Signal};
pub use code_generator::{CodeGenerator, DEFAULT_CODE_LENGTH};
pub use expiry::{ExpiryPolicy, Freshness};
pub use otp::{IssueOutcome, Mailer, OtpConfig, OtpCredentialManager, ValidateOutcome};
