//! Authentication request and response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use mz_core::domain::entities::user::User;
use mz_core::domain::value_objects::auth::{AuthSession, OtpResent, RegistrationStarted};
use mz_shared::validation::{has_letter_and_digit, OTP_CODE_REGEX, PHONE_REGEX, RESET_TOKEN_REGEX};

/// Request body for POST /auth/register/start
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterStartRequest {
    #[validate(email(message = "Invalid email"), length(max = 254))]
    pub email: String,

    #[validate(
        length(min = 8, max = 64, message = "Password must be 8-64 characters"),
        custom = "password_strength"
    )]
    pub password: String,

    #[validate(length(min = 2, max = 60, message = "Name must be 2-60 characters"))]
    pub name: String,

    #[validate(
        length(min = 9, max = 16),
        regex(
            path = "PHONE_REGEX",
            message = "Mobile number must be 9-15 digits (optionally starting with +country code)"
        )
    )]
    pub phone: String,
}

/// Request body for POST /auth/register/verify
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterVerifyRequest {
    #[validate(length(min = 3, max = 254))]
    pub email: String,

    #[validate(
        length(min = 4, max = 6),
        regex(path = "OTP_CODE_REGEX", message = "OTP must be 4-6 digits")
    )]
    pub otp: String,
}

/// Request body for POST /auth/register/resend
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResendOtpRequest {
    #[validate(email(message = "Invalid email"))]
    pub email: String,
}

/// Request body for POST /auth/login
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email"))]
    pub email: String,

    #[validate(length(min = 8, max = 64, message = "Password must be 8-64 characters"))]
    pub password: String,
}

/// Request body for POST /auth/password/forgot
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email"))]
    pub email: String,
}

/// Request body for POST /auth/password/reset
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResetPasswordRequest {
    #[validate(email(message = "Invalid email"))]
    pub email: String,

    #[validate(
        length(equal = 64),
        regex(path = "RESET_TOKEN_REGEX", message = "Invalid reset token")
    )]
    pub token: String,

    #[validate(
        length(min = 8, max = 64, message = "Password must be 8-64 characters"),
        custom = "password_strength"
    )]
    pub password: String,
}

fn password_strength(password: &str) -> Result<(), ValidationError> {
    if has_letter_and_digit(password) {
        return Ok(());
    }
    let mut error = ValidationError::new("password_strength");
    error.message = Some("Password must contain at least 1 letter and 1 number".into());
    Err(error)
}

/// Profile echo returned by register/start
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Response body for POST /auth/register/start
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterStartResponse {
    pub user: RegisteredUser,
    pub otp_sent: bool,
}

impl From<RegistrationStarted> for RegisterStartResponse {
    fn from(started: RegistrationStarted) -> Self {
        Self {
            user: RegisteredUser {
                id: started.user.id,
                email: started.user.email,
                name: started.user.name,
                phone: started.user.phone,
            },
            otp_sent: started.otp_sent,
        }
    }
}

/// Response body for POST /auth/register/resend
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendOtpResponse {
    pub otp_sent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<OtpResent> for ResendOtpResponse {
    fn from(resent: OtpResent) -> Self {
        Self {
            otp_sent: resent.otp_sent,
            message: resent.message,
        }
    }
}

/// Account shape carried inside session responses
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            created_at: user.created_at,
        }
    }
}

/// Response body for POST /auth/login
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: SessionUser,
    pub access_token: String,
}

impl From<AuthSession> for SessionResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            user: SessionUser::from(&session.user),
            access_token: session.access_token,
        }
    }
}

/// Response body for POST /auth/register/verify
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedSessionResponse {
    pub user: SessionUser,
    pub access_token: String,
    pub verified: bool,
}

impl From<AuthSession> for VerifiedSessionResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            user: SessionUser::from(&session.user),
            access_token: session.access_token,
            verified: true,
        }
    }
}

/// Response body for POST /auth/password/forgot
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordResponse {
    pub requested: bool,
}

/// Response body for POST /auth/password/reset
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordResponse {
    pub reset: bool,
}

/// Account shape returned by GET /auth/me; the `userId` key matches the
/// JWT claim name the frontend reads
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub is_email_verified: bool,
}

/// Response body for GET /auth/me
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user: CurrentUser,
}

impl From<User> for MeResponse {
    fn from(user: User) -> Self {
        Self {
            user: CurrentUser {
                user_id: user.id,
                email: user.email,
                name: user.name,
                phone: user.phone,
                is_email_verified: user.is_email_verified,
            },
        }
    }
}
