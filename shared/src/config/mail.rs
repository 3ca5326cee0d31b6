//! SMTP mail delivery configuration

use serde::{Deserialize, Serialize};

/// SMTP server configuration for outbound code delivery
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmtpConfig {
    /// SMTP relay host
    pub host: String,

    /// SMTP relay port
    pub port: u16,

    /// SMTP username (empty disables authentication)
    #[serde(default)]
    pub username: String,

    /// SMTP password
    #[serde(default)]
    pub password: String,

    /// Sender address placed in the From header
    pub from_address: String,

    /// Sender display name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Use STARTTLS on the connection
    #[serde(default = "default_starttls")]
    pub starttls: bool,

    /// Send timeout in seconds
    #[serde(default = "default_send_timeout")]
    pub send_timeout: u64,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::from("localhost"),
            port: 587,
            username: String::new(),
            password: String::new(),
            from_address: String::from("no-reply@mailcode.local"),
            from_name: default_from_name(),
            starttls: default_starttls(),
            send_timeout: default_send_timeout(),
        }
    }
}

impl SmtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("SMTP_HOST").unwrap_or(defaults.host),
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            username: std::env::var("SMTP_USERNAME").unwrap_or_default(),
            password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
            from_address: std::env::var("SMTP_FROM_ADDRESS").unwrap_or(defaults.from_address),
            from_name: std::env::var("SMTP_FROM_NAME").unwrap_or(defaults.from_name),
            starttls: std::env::var("SMTP_STARTTLS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.starttls),
            send_timeout: defaults.send_timeout,
        }
    }

    /// Whether credentials should be supplied to the relay
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty()
    }

    /// Formatted From header value ("Name <address>")
    pub fn from_header(&self) -> String {
        if self.from_name.is_empty() {
            self.from_address.clone()
        } else {
            format!("{} <{}>", self.from_name, self.from_address)
        }
    }
}

fn default_from_name() -> String {
    String::from("MailCode")
}

fn default_starttls() -> bool {
    true
}

fn default_send_timeout() -> u64 {
    10
}
