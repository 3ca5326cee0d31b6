//! Email delivery module.
//!
//! `SmtpMailer` delivers codes through a configured SMTP relay;
//! `MockMailer` records deliveries for development and tests.

mod mock;
mod smtp;
mod template;

pub use mock::MockMailer;
pub use smtp::SmtpMailer;
pub use template::CodeEmailTemplate;
