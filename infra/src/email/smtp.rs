//! SMTP delivery of one-time codes.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::{info, warn};

use mc_core::domain::entities::user_ref::UserRef;
use mc_core::errors::DeliveryError;
use mc_core::services::otp::Mailer;
use mc_shared::config::mail::SmtpConfig;

use crate::InfrastructureError;

use super::template::CodeEmailTemplate;

/// Mailer delivering codes through an SMTP relay.
///
/// Expected delivery failures (unparseable recipient, relay refusing the
/// message) are returned as `DeliveryError` values; issuance is never
/// rolled back on them.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    template: CodeEmailTemplate,
    ttl_minutes: i64,
}

impl SmtpMailer {
    /// Build a mailer from SMTP configuration.
    ///
    /// `ttl_seconds` is the validity window quoted in the message body,
    /// rounded up to whole minutes.
    pub fn new(
        config: &SmtpConfig,
        template: CodeEmailTemplate,
        ttl_seconds: i64,
    ) -> Result<Self, InfrastructureError> {
        let mut builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };
        builder = builder
            .port(config.port)
            .timeout(Some(Duration::from_secs(config.send_timeout)));
        if config.has_credentials() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        let from = config
            .from_header()
            .parse::<Mailbox>()
            .map_err(|e| InfrastructureError::Config(format!("invalid sender address: {}", e)))?;

        Ok(Self {
            transport: builder.build(),
            from,
            template,
            ttl_minutes: (ttl_seconds + 59) / 60,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn deliver_code(&self, user: &UserRef, code: &str) -> Result<(), DeliveryError> {
        let to = user
            .email
            .parse::<Mailbox>()
            .map_err(|e| DeliveryError::new(format!("invalid recipient address: {}", e)))?;

        let (subject, body) = self.template.render(code, self.ttl_minutes);
        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .body(body)
            .map_err(|e| DeliveryError::new(format!("message build failed: {}", e)))?;

        match self.transport.send(message).await {
            Ok(_) => {
                info!(
                    realm = %user.realm,
                    user = %user.id,
                    email = %user.masked_email(),
                    event = "code_mail_sent",
                    "Delivered verification code mail"
                );
                Ok(())
            }
            Err(e) => {
                warn!(
                    realm = %user.realm,
                    user = %user.id,
                    email = %user.masked_email(),
                    error = %e,
                    event = "code_mail_failed",
                    "SMTP delivery failed"
                );
                Err(DeliveryError::new(e.to_string()))
            }
        }
    }
}
