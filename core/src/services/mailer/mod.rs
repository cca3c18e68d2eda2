//! Outbound email abstraction.
//!
//! Services compose HTML bodies from [`templates`] and hand them to a
//! [`Mailer`]; the SMTP implementation lives in the infrastructure crate.

use async_trait::async_trait;

use crate::errors::DomainError;

pub mod templates;

mod mock;
pub use mock::{MockMailer, SentEmail};

/// Contract for sending HTML email
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_html(&self, to: &str, subject: &str, html: &str) -> Result<(), DomainError>;
}
