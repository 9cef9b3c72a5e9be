// SPDX-FileCopyrightText: 2026 Nowhere Digital Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SMTP transport built on lettre.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use nowhere_config::model::EmailConfig;
use nowhere_core::{
    AdapterType, HealthStatus, MailTransport, NowhereError, OutboundEmail, PluginAdapter,
};
use tracing::{debug, info, warn};

/// Implicit-TLS submission port; every other port negotiates STARTTLS.
const SMTPS_PORT: u16 = 465;

/// Parses an address into a lettre mailbox.
pub fn parse_mailbox(address: &str) -> Result<Mailbox, NowhereError> {
    address.trim().parse::<Mailbox>().map_err(|e| NowhereError::Email {
        message: format!("invalid email address `{address}`: {e}"),
        source: Some(Box::new(e)),
    })
}

/// SMTP mail transport.
///
/// Without both a relay host and a password the mailer is unconfigured:
/// [`MailTransport::send`] logs a warning and returns `Ok(false)`.
pub struct SmtpMailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &EmailConfig) -> Result<Self, NowhereError> {
        let from = parse_mailbox(&config.sender_email)?;

        let transport = match (&config.smtp_host, &config.smtp_password) {
            (Some(host), Some(password)) if !host.is_empty() && !password.is_empty() => {
                let username = config
                    .smtp_username
                    .clone()
                    .unwrap_or_else(|| config.sender_email.clone());
                let builder = if config.smtp_port == SMTPS_PORT {
                    AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                } else {
                    AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                }
                .map_err(|e| NowhereError::Email {
                    message: format!("invalid SMTP relay `{host}`: {e}"),
                    source: Some(Box::new(e)),
                })?;
                info!(host, port = config.smtp_port, "SMTP mailer configured");
                Some(
                    builder
                        .port(config.smtp_port)
                        .credentials(Credentials::new(username, password.clone()))
                        .build(),
                )
            }
            _ => {
                warn!("SMTP credentials not configured, outbound email disabled");
                None
            }
        };

        Ok(Self { transport, from })
    }

    fn build_message(&self, email: &OutboundEmail) -> Result<Message, NowhereError> {
        Message::builder()
            .from(self.from.clone())
            .to(parse_mailbox(&email.to)?)
            .subject(email.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(email.html_body.clone())
            .map_err(|e| NowhereError::Email {
                message: format!("failed to build message: {e}"),
                source: Some(Box::new(e)),
            })
    }
}

#[async_trait]
impl PluginAdapter for SmtpMailer {
    fn name(&self) -> &str {
        "smtp"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Email
    }

    async fn health_check(&self) -> Result<HealthStatus, NowhereError> {
        let Some(transport) = &self.transport else {
            return Ok(HealthStatus::Degraded("SMTP not configured".into()));
        };
        match transport.test_connection().await {
            Ok(true) => Ok(HealthStatus::Healthy),
            Ok(false) => Ok(HealthStatus::Unhealthy("SMTP relay refused connection".into())),
            Err(e) => Ok(HealthStatus::Unhealthy(format!("SMTP relay unreachable: {e}"))),
        }
    }

    async fn shutdown(&self) -> Result<(), NowhereError> {
        debug!("SMTP mailer shutting down");
        Ok(())
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    fn is_configured(&self) -> bool {
        self.transport.is_some()
    }

    async fn send(&self, email: &OutboundEmail) -> Result<bool, NowhereError> {
        let Some(transport) = &self.transport else {
            warn!(to = %email.to, subject = %email.subject, "SMTP not configured, email not sent");
            return Ok(false);
        };

        let message = self.build_message(email)?;
        transport
            .send(message)
            .await
            .map_err(|e| NowhereError::Email {
                message: format!("SMTP delivery to {} failed: {e}", email.to),
                source: Some(Box::new(e)),
            })?;

        info!(to = %email.to, "email sent successfully");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unconfigured() -> EmailConfig {
        EmailConfig::default()
    }

    #[test]
    fn parse_mailbox_accepts_plain_and_named_addresses() {
        assert!(parse_mailbox("a@x.com").is_ok());
        assert!(parse_mailbox("Nowhere Digital <hello@nowhere.digital>").is_ok());
        assert!(matches!(
            parse_mailbox("not an address"),
            Err(NowhereError::Email { .. })
        ));
    }

    #[test]
    fn missing_password_leaves_mailer_unconfigured() {
        let mut config = unconfigured();
        config.smtp_host = Some("smtp.example.com".into());
        let mailer = SmtpMailer::new(&config).unwrap();
        assert!(!mailer.is_configured());
    }

    #[test]
    fn host_and_password_configure_mailer() {
        let mut config = unconfigured();
        config.smtp_host = Some("smtp.example.com".into());
        config.smtp_password = Some("secret".into());
        let mailer = SmtpMailer::new(&config).unwrap();
        assert!(mailer.is_configured());
    }

    #[tokio::test]
    async fn unconfigured_send_is_a_noop_returning_false() {
        let mailer = SmtpMailer::new(&unconfigured()).unwrap();
        let sent = mailer
            .send(&OutboundEmail {
                to: "a@x.com".into(),
                subject: "hi".into(),
                html_body: "<p>hi</p>".into(),
            })
            .await
            .unwrap();
        assert!(!sent);
        assert_eq!(
            mailer.health_check().await.unwrap(),
            HealthStatus::Degraded("SMTP not configured".into())
        );
    }

    #[test]
    fn build_message_rejects_bad_recipient() {
        let mailer = SmtpMailer::new(&unconfigured()).unwrap();
        let result = mailer.build_message(&OutboundEmail {
            to: "nope".into(),
            subject: "s".into(),
            html_body: String::new(),
        });
        assert!(result.is_err());
    }
}
