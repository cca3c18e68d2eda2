//! User entity representing a registered account in the Manzil system.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of OTP verification attempts before a resend is required
pub const MAX_OTP_ATTEMPTS: i32 = 5;

/// Length of the email verification code
pub const OTP_LENGTH: usize = 4;

/// Lifetime of an email verification code (minutes)
pub const OTP_EXPIRY_MINUTES: i64 = 5;

/// Lifetime of a password-reset token (minutes)
pub const RESET_TOKEN_EXPIRY_MINUTES: i64 = 30;

/// User entity representing a registered account.
///
/// OTP and reset-token state lives directly on the user row; there is no
/// separate verification store. All stored secrets are hashes, never the
/// raw code or token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address, stored lowercased and trimmed
    pub email: String,

    /// bcrypt hash of the password
    pub password_hash: String,

    /// Display name
    pub name: Option<String>,

    /// Contact phone number
    pub phone: Option<String>,

    /// Whether the email address has been verified
    pub is_email_verified: bool,

    /// Salted SHA-256 hash of the pending email OTP
    pub otp_hash: Option<String>,

    /// Expiry of the pending email OTP
    pub otp_expires_at: Option<DateTime<Utc>>,

    /// Failed verification attempts against the pending OTP
    pub otp_attempts: i32,

    /// Salted SHA-256 hash of the pending password-reset token
    pub reset_token_hash: Option<String>,

    /// Expiry of the pending password-reset token
    pub reset_token_expires_at: Option<DateTime<Utc>>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new unverified user
    pub fn new(email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            name: None,
            phone: None,
            is_email_verified: false,
            otp_hash: None,
            otp_expires_at: None,
            otp_attempts: 0,
            reset_token_hash: None,
            reset_token_expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets profile fields supplied at registration
    pub fn with_profile(mut self, name: Option<String>, phone: Option<String>) -> Self {
        self.name = name;
        self.phone = phone;
        self
    }

    /// Stores a freshly issued OTP hash and resets the attempt counter
    pub fn issue_otp(&mut self, otp_hash: String) {
        let now = Utc::now();
        self.otp_hash = Some(otp_hash);
        self.otp_expires_at = Some(now + Duration::minutes(OTP_EXPIRY_MINUTES));
        self.otp_attempts = 0;
        self.updated_at = now;
    }

    /// Whether an OTP has been issued and not yet cleared
    pub fn has_pending_otp(&self) -> bool {
        self.otp_hash.is_some() && self.otp_expires_at.is_some()
    }

    /// Whether the pending OTP has passed its expiry
    pub fn is_otp_expired(&self) -> bool {
        match self.otp_expires_at {
            Some(expires_at) => Utc::now() > expires_at,
            None => true,
        }
    }

    /// Whether further OTP attempts are allowed
    pub fn has_otp_attempts_remaining(&self) -> bool {
        self.otp_attempts < MAX_OTP_ATTEMPTS
    }

    /// Records a failed OTP attempt
    pub fn record_failed_otp_attempt(&mut self) {
        self.otp_attempts += 1;
        self.updated_at = Utc::now();
    }

    /// Marks the email as verified and clears OTP state
    pub fn mark_email_verified(&mut self) {
        self.is_email_verified = true;
        self.otp_hash = None;
        self.otp_expires_at = None;
        self.otp_attempts = 0;
        self.updated_at = Utc::now();
    }

    /// Stores a freshly issued password-reset token hash
    pub fn issue_reset_token(&mut self, token_hash: String) {
        let now = Utc::now();
        self.reset_token_hash = Some(token_hash);
        self.reset_token_expires_at = Some(now + Duration::minutes(RESET_TOKEN_EXPIRY_MINUTES));
        self.updated_at = now;
    }

    /// Whether a reset token has been issued and not yet consumed
    pub fn has_pending_reset_token(&self) -> bool {
        self.reset_token_hash.is_some() && self.reset_token_expires_at.is_some()
    }

    /// Whether the pending reset token has passed its expiry
    pub fn is_reset_token_expired(&self) -> bool {
        match self.reset_token_expires_at {
            Some(expires_at) => Utc::now() > expires_at,
            None => true,
        }
    }

    /// Replaces the password hash and consumes the reset token
    pub fn apply_password_reset(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.reset_token_hash = None;
        self.reset_token_expires_at = None;
        self.updated_at = Utc::now();
    }

    /// Replaces registration data on an unverified account that re-registers
    pub fn restart_registration(
        &mut self,
        password_hash: String,
        name: Option<String>,
        phone: Option<String>,
    ) {
        self.password_hash = password_hash;
        if name.is_some() {
            self.name = name;
        }
        if phone.is_some() {
            self.phone = phone;
        }
        self.updated_at = Utc::now();
    }
}
