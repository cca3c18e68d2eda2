//! SMTP implementation of the Mailer trait.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use mz_core::errors::DomainError;
use mz_core::services::mailer::Mailer;
use mz_shared::config::MailConfig;

/// Sends HTML email through a configured SMTP relay.
///
/// Port 465 uses implicit TLS, anything else STARTTLS. The transport keeps
/// a connection pool, so one instance is shared across the application.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Builds the transport and parses the From header once.
    pub fn new(config: &MailConfig) -> Result<Self, DomainError> {
        let builder = if config.smtp_port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
        }
        .map_err(|e| DomainError::Mail {
            message: format!("Failed to configure SMTP relay: {}", e),
        })?;

        let transport = builder
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ))
            .build();

        let from = config
            .from_mailbox()
            .parse()
            .map_err(|e| DomainError::Mail {
                message: format!("Invalid From address: {}", e),
            })?;

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_html(&self, to: &str, subject: &str, html: &str) -> Result<(), DomainError> {
        let recipient: Mailbox = to.parse().map_err(|e| DomainError::Mail {
            message: format!("Invalid recipient address: {}", e),
        })?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html.to_string())
            .map_err(|e| DomainError::Mail {
                message: format!("Failed to build email: {}", e),
            })?;

        self.transport
            .send(message)
            .await
            .map_err(|e| DomainError::Mail {
                message: format!("Failed to send email: {}", e),
            })?;

        tracing::debug!(subject, "email dispatched");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_parses_from_mailbox() {
        let config = MailConfig {
            from_address: String::from("listings@manzil.example"),
            ..Default::default()
        };

        let mailer = SmtpMailer::new(&config).unwrap();
        assert_eq!(mailer.from.email.to_string(), "listings@manzil.example");
    }

    #[tokio::test]
    async fn test_new_rejects_malformed_from_address() {
        let config = MailConfig {
            from_address: String::from("not an address"),
            ..Default::default()
        };

        assert!(SmtpMailer::new(&config).is_err());
    }
}
