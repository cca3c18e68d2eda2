//! Main authentication service implementation

use std::sync::Arc;

use uuid::Uuid;

use mz_shared::validation::{mask_email, normalize_email};

use crate::domain::entities::user::User;
use crate::domain::value_objects::auth::{AuthSession, OtpResent, RegistrationStarted};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::mailer::{templates, Mailer};
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::otp::{generate_otp, generate_reset_token, hash_with_secret};

/// Authentication service for email/password accounts.
///
/// Registration is a two step flow: `register_start` stores the account
/// unverified and emails a 4 digit code, `register_verify` checks the code
/// and activates the account. Passwords are bcrypt hashed; OTP codes and
/// reset tokens are stored as salted SHA-256 hashes.
pub struct AuthService<U, M>
where
    U: UserRepository,
    M: Mailer,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Token service for JWT management
    token_service: Arc<TokenService>,
    /// Outbound email
    mailer: Arc<M>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, M> AuthService<U, M>
where
    U: UserRepository,
    M: Mailer,
{
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService>,
        mailer: Arc<M>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            mailer,
            config,
        }
    }

    /// Starts (or restarts) a registration.
    ///
    /// This method:
    /// 1. Rejects emails that already belong to a verified account
    /// 2. Creates the account unverified, or refreshes the pending one in
    ///    place, keeping its id
    /// 3. Issues a fresh OTP and emails it
    ///
    /// A failed OTP email fails the whole call; the client can retry.
    pub async fn register_start(
        &self,
        email: &str,
        password: &str,
        name: Option<String>,
        phone: Option<String>,
    ) -> DomainResult<RegistrationStarted> {
        let email = normalize_email(email);

        // Step 1: A verified account blocks re-registration
        let existing = self.user_repository.find_by_email(&email).await?;
        if let Some(user) = &existing {
            if user.is_email_verified {
                return Err(AuthError::EmailAlreadyRegistered.into());
            }
        }

        // Step 2: Hash credentials and issue the code
        let password_hash = hash_password(password, self.config.bcrypt_cost)?;
        let code = generate_otp();
        let otp_hash = hash_with_secret(&code, &self.config.otp_secret);

        let user = match existing {
            Some(mut user) => {
                user.restart_registration(password_hash, name, phone);
                user.issue_otp(otp_hash);
                self.user_repository.update(user).await?
            }
            None => {
                let mut user = User::new(email.clone(), password_hash).with_profile(name, phone);
                user.issue_otp(otp_hash);
                self.user_repository.create(user).await?
            }
        };

        // Step 3: Deliver the code
        self.mailer
            .send_html(&email, templates::OTP_SUBJECT, &templates::otp_email(&code))
            .await?;

        tracing::info!(email = %mask_email(&email), "registration started, verification code sent");

        Ok(RegistrationStarted {
            user,
            otp_sent: true,
        })
    }

    /// Re-issues the verification code for a pending registration.
    ///
    /// Unknown emails are rejected; already verified accounts get a no-op
    /// response instead of a new code.
    pub async fn resend_otp(&self, email: &str) -> DomainResult<OtpResent> {
        let email = normalize_email(email);

        let mut user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UnknownEmail)?;

        if user.is_email_verified {
            return Ok(OtpResent::skipped("Email already verified"));
        }

        let code = generate_otp();
        user.issue_otp(hash_with_secret(&code, &self.config.otp_secret));
        self.user_repository.update(user).await?;

        self.mailer
            .send_html(&email, templates::OTP_SUBJECT, &templates::otp_email(&code))
            .await?;

        tracing::info!(email = %mask_email(&email), "verification code resent");

        Ok(OtpResent::sent())
    }

    /// Verifies the emailed code and activates the account.
    ///
    /// This method:
    /// 1. Returns a session immediately when the account is already verified
    /// 2. Requires a pending code with attempts left and time left
    /// 3. Counts wrong entries; after too many the user must resend
    /// 4. On success clears the OTP state, confirms by email and returns a
    ///    session
    pub async fn register_verify(&self, email: &str, code: &str) -> DomainResult<AuthSession> {
        let email = normalize_email(email);
        let code = code.trim();

        let mut user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UnknownEmail)?;

        // Step 1: Verifying twice is a success, not an error
        if user.is_email_verified {
            return self.session_for(user);
        }

        // Step 2: Gate on OTP state
        if !user.has_pending_otp() {
            return Err(AuthError::OtpNotRequested.into());
        }
        if user.otp_attempts >= self.config.max_otp_attempts {
            return Err(AuthError::TooManyOtpAttempts.into());
        }
        if user.is_otp_expired() {
            return Err(AuthError::OtpExpired.into());
        }

        // Step 3: Compare salted hashes, counting the miss
        let submitted = hash_with_secret(code, &self.config.otp_secret);
        if user.otp_hash.as_deref() != Some(submitted.as_str()) {
            user.record_failed_otp_attempt();
            let attempts = user.otp_attempts;
            self.user_repository.update(user).await?;
            tracing::warn!(
                email = %mask_email(&email),
                attempts,
                "verification code mismatch"
            );
            return Err(AuthError::InvalidOtp.into());
        }

        // Step 4: Activate and confirm
        user.mark_email_verified();
        let user = self.user_repository.update(user).await?;

        self.mailer
            .send_html(
                &email,
                templates::VERIFIED_SUBJECT,
                &templates::email_verified(),
            )
            .await?;

        tracing::info!(email = %mask_email(&email), "email verified");

        self.session_for(user)
    }

    /// Authenticates an email/password pair.
    ///
    /// Unverified accounts are told so; every other failure is the generic
    /// invalid-credentials answer.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthSession> {
        let email = normalize_email(email);

        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.is_email_verified {
            return Err(AuthError::EmailNotVerified.into());
        }

        let ok = bcrypt::verify(password, &user.password_hash).map_err(|e| {
            DomainError::Internal {
                message: format!("Password verification failed: {}", e),
            }
        })?;
        if !ok {
            return Err(AuthError::InvalidCredentials.into());
        }

        tracing::info!(email = %mask_email(&email), "login succeeded");

        self.session_for(user)
    }

    /// Issues a password reset link valid for 30 minutes.
    ///
    /// The raw token only travels inside the emailed link; the database
    /// keeps its salted hash.
    pub async fn forgot_password(&self, email: &str) -> DomainResult<()> {
        let email = normalize_email(email);

        let mut user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let token = generate_reset_token();
        user.issue_reset_token(hash_with_secret(&token, &self.config.otp_secret));
        self.user_repository.update(user).await?;

        let reset_url = format!(
            "{}/reset-password?email={}&token={}",
            self.config.frontend_origin,
            urlencoding::encode(&email),
            urlencoding::encode(&token),
        );

        self.mailer
            .send_html(
                &email,
                templates::RESET_SUBJECT,
                &templates::reset_password_email(&reset_url),
            )
            .await?;

        tracing::info!(email = %mask_email(&email), "password reset link sent");

        Ok(())
    }

    /// Consumes a reset link and stores the new password.
    pub async fn reset_password(
        &self,
        email: &str,
        token: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let email = normalize_email(email);

        let mut user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidResetToken)?;

        if !user.has_pending_reset_token() || user.is_reset_token_expired() {
            return Err(AuthError::ResetTokenExpired.into());
        }

        let submitted = hash_with_secret(token.trim(), &self.config.otp_secret);
        if user.reset_token_hash.as_deref() != Some(submitted.as_str()) {
            return Err(AuthError::InvalidResetToken.into());
        }

        let password_hash = hash_password(new_password, self.config.bcrypt_cost)?;
        user.apply_password_reset(password_hash);
        self.user_repository.update(user).await?;

        tracing::info!(email = %mask_email(&email), "password reset completed");

        Ok(())
    }

    /// Loads the current user for an authenticated request
    pub async fn me(&self, user_id: Uuid) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::InvalidCredentials.into())
    }

    fn session_for(&self, user: User) -> DomainResult<AuthSession> {
        let access_token = self
            .token_service
            .generate_access_token(user.id, &user.email)?;
        Ok(AuthSession::new(user, access_token))
    }
}

fn hash_password(password: &str, cost: u32) -> DomainResult<String> {
    bcrypt::hash(password, cost).map_err(|e| DomainError::Internal {
        message: format!("Password hashing failed: {}", e),
    })
}
