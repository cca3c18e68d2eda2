//! Outbound mail configuration

use serde::{Deserialize, Serialize};

/// SMTP delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// SMTP relay host
    pub smtp_host: String,

    /// SMTP relay port (465 = implicit TLS)
    pub smtp_port: u16,

    /// SMTP username
    pub smtp_username: String,

    /// SMTP password
    pub smtp_password: String,

    /// Display name for the From header
    pub from_name: String,

    /// Address for the From header (defaults to the SMTP username)
    pub from_address: String,

    /// Public origin of the web frontend, used to build reset links
    pub frontend_origin: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: String::from("smtp.gmail.com"),
            smtp_port: 465,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_name: String::from("Manzil"),
            from_address: String::new(),
            frontend_origin: String::from("http://localhost:3000"),
        }
    }
}

impl MailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let smtp_host =
            std::env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string());
        let smtp_port = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(465);
        let smtp_username = std::env::var("SMTP_EMAIL").unwrap_or_default();
        let smtp_password = std::env::var("SMTP_PASSWORD").unwrap_or_default();
        let from_address =
            std::env::var("MAIL_FROM_ADDRESS").unwrap_or_else(|_| smtp_username.clone());
        let frontend_origin = std::env::var("FRONTEND_ORIGIN")
            .map(|origins| {
                // First entry wins when several origins are configured
                origins
                    .split(',')
                    .next()
                    .unwrap_or("")
                    .trim()
                    .trim_end_matches('/')
                    .to_string()
            })
            .ok()
            .filter(|o| !o.is_empty())
            .unwrap_or_else(|| "http://localhost:3000".to_string());

        Self {
            smtp_host,
            smtp_port,
            smtp_username,
            smtp_password,
            from_name: String::from("Manzil"),
            from_address,
            frontend_origin,
        }
    }

    /// Formatted From header value, e.g. `Manzil <listings@manzil.example>`
    pub fn from_mailbox(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_address)
    }

    /// Whether SMTP credentials have been provided
    pub fn has_credentials(&self) -> bool {
        !self.smtp_username.is_empty() && !self.smtp_password.is_empty()
    }
}
