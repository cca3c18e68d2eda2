//! Mock implementation of Mailer for testing

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::Mailer;

/// A captured outbound email
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Records outbound email instead of sending it
pub struct MockMailer {
    sent: Arc<RwLock<Vec<SentEmail>>>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
            should_fail: Arc::new(RwLock::new(false)),
        }
    }

    /// Makes every subsequent send fail
    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    /// All captured emails, oldest first
    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.read().await.len()
    }

    /// The most recent captured email
    pub async fn last(&self) -> Option<SentEmail> {
        self.sent.read().await.last().cloned()
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send_html(&self, to: &str, subject: &str, html: &str) -> Result<(), DomainError> {
        if *self.should_fail.read().await {
            return Err(DomainError::Mail {
                message: "mock mailer configured to fail".to_string(),
            });
        }

        self.sent.write().await.push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
        });
        Ok(())
    }
}
