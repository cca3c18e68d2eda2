//! Results returned by authentication flows.

use serde::{Deserialize, Serialize};

use crate::domain::entities::user::User;

/// An authenticated user together with a freshly issued access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub access_token: String,
}

impl AuthSession {
    pub fn new(user: User, access_token: String) -> Self {
        Self { user, access_token }
    }
}

/// Outcome of starting (or restarting) a registration
#[derive(Debug, Clone)]
pub struct RegistrationStarted {
    pub user: User,
    pub otp_sent: bool,
}

/// Outcome of an OTP resend request
#[derive(Debug, Clone)]
pub struct OtpResent {
    pub otp_sent: bool,
    /// Informational message when no code was sent
    pub message: Option<String>,
}

impl OtpResent {
    pub fn sent() -> Self {
        Self {
            otp_sent: true,
            message: None,
        }
    }

    pub fn skipped(message: impl Into<String>) -> Self {
        Self {
            otp_sent: false,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_resent_constructors() {
        let sent = OtpResent::sent();
        assert!(sent.otp_sent);
        assert!(sent.message.is_none());

        let skipped = OtpResent::skipped("Email already verified");
        assert!(!skipped.otp_sent);
        assert_eq!(skipped.message.as_deref(), Some("Email already verified"));
    }
}
