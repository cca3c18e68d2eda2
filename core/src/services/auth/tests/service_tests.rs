//! End-to-end tests for the registration, login and reset flows, running
//! against the in-memory repository and mailer.

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::errors::{AuthError, DomainError};
use crate::repositories::{MockUserRepository, UserRepository};
use crate::services::auth::{AuthService, AuthServiceConfig};
use crate::services::mailer::MockMailer;
use crate::services::token::{TokenService, TokenServiceConfig};

type TestService = AuthService<MockUserRepository, MockMailer>;

fn service() -> (TestService, Arc<MockUserRepository>, Arc<MockMailer>) {
    let repo = Arc::new(MockUserRepository::new());
    let mailer = Arc::new(MockMailer::new());
    let tokens = Arc::new(TokenService::new(TokenServiceConfig::new(
        "unit-test-secret",
        3600,
    )));
    let config = AuthServiceConfig {
        otp_secret: "otp-secret".to_string(),
        // low bcrypt cost keeps the suite fast
        bcrypt_cost: 4,
        ..Default::default()
    };
    let auth = AuthService::new(Arc::clone(&repo), tokens, Arc::clone(&mailer), config);
    (auth, repo, mailer)
}

/// Pulls the 4 digit code back out of the captured OTP email
fn extract_otp(html: &str) -> String {
    let start = html.find("letter-spacing:10px").expect("otp block missing");
    let rest = &html[start..];
    let after = &rest[rest.find('>').expect("otp block malformed") + 1..];
    after[..after.find('<').expect("otp block malformed")]
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect()
}

/// Pulls the raw reset token back out of the captured reset email link
fn extract_reset_token(html: &str) -> String {
    let start = html.find("&token=").expect("reset link missing") + "&token=".len();
    let rest = &html[start..];
    rest[..rest.find('"').expect("reset link malformed")].to_string()
}

async fn registered(auth: &TestService, mailer: &MockMailer, email: &str) {
    auth.register_start(email, "Passw0rd!", Some("Test User".to_string()), None)
        .await
        .unwrap();
    let otp = extract_otp(&mailer.last().await.unwrap().html);
    auth.register_verify(email, &otp).await.unwrap();
}

#[tokio::test]
async fn test_register_start_creates_unverified_user_and_emails_code() {
    let (auth, repo, mailer) = service();

    let started = auth
        .register_start(
            "  NEW@Example.com ",
            "Passw0rd!",
            Some("Sara".to_string()),
            Some("+971501112222".to_string()),
        )
        .await
        .unwrap();

    assert!(started.otp_sent);
    assert_eq!(started.user.email, "new@example.com");
    assert!(!started.user.is_email_verified);
    assert!(started.user.otp_hash.is_some());
    assert_eq!(repo.count().await, 1);

    let email = mailer.last().await.unwrap();
    assert_eq!(email.to, "new@example.com");
    assert_eq!(email.subject, "Your Manzil verification code");
    assert_eq!(extract_otp(&email.html).len(), 4);
}

#[tokio::test]
async fn test_register_start_rejects_verified_email() {
    let (auth, _repo, mailer) = service();
    registered(&auth, &mailer, "taken@example.com").await;

    let err = auth
        .register_start("taken@example.com", "Another1!", None, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::EmailAlreadyRegistered)
    ));
}

#[tokio::test]
async fn test_register_start_restarts_pending_registration() {
    let (auth, repo, mailer) = service();

    let first = auth
        .register_start("user@example.com", "Passw0rd!", None, None)
        .await
        .unwrap();
    let second = auth
        .register_start("user@example.com", "Fresh0ne!", Some("Named".to_string()), None)
        .await
        .unwrap();

    // restarted in place, not duplicated
    assert_eq!(first.user.id, second.user.id);
    assert_eq!(second.user.name.as_deref(), Some("Named"));
    assert_eq!(repo.count().await, 1);

    // only the latest code works
    let latest_otp = extract_otp(&mailer.last().await.unwrap().html);
    let session = auth
        .register_verify("user@example.com", &latest_otp)
        .await
        .unwrap();
    assert!(session.user.is_email_verified);
}

#[tokio::test]
async fn test_resend_otp_unknown_email_rejected() {
    let (auth, _repo, _mailer) = service();

    let err = auth.resend_otp("ghost@example.com").await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::UnknownEmail)));
}

#[tokio::test]
async fn test_resend_otp_skips_verified_account() {
    let (auth, _repo, mailer) = service();
    registered(&auth, &mailer, "done@example.com").await;
    let sent_before = mailer.sent_count().await;

    let resent = auth.resend_otp("done@example.com").await.unwrap();

    assert!(!resent.otp_sent);
    assert_eq!(resent.message.as_deref(), Some("Email already verified"));
    assert_eq!(mailer.sent_count().await, sent_before);
}

#[tokio::test]
async fn test_resend_otp_invalidates_previous_code() {
    let (auth, _repo, mailer) = service();

    auth.register_start("user@example.com", "Passw0rd!", None, None)
        .await
        .unwrap();
    let first_otp = extract_otp(&mailer.last().await.unwrap().html);

    auth.resend_otp("user@example.com").await.unwrap();
    let second_otp = extract_otp(&mailer.last().await.unwrap().html);

    if first_otp != second_otp {
        let err = auth
            .register_verify("user@example.com", &first_otp)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Auth(AuthError::InvalidOtp)));
    }
    let session = auth
        .register_verify("user@example.com", &second_otp)
        .await
        .unwrap();
    assert!(session.user.is_email_verified);
}

#[tokio::test]
async fn test_register_verify_activates_account_and_confirms_by_email() {
    let (auth, _repo, mailer) = service();

    auth.register_start("user@example.com", "Passw0rd!", None, None)
        .await
        .unwrap();
    let otp = extract_otp(&mailer.last().await.unwrap().html);

    let session = auth.register_verify("user@example.com", &otp).await.unwrap();

    assert!(session.user.is_email_verified);
    assert!(session.user.otp_hash.is_none());
    assert!(!session.access_token.is_empty());

    let confirmation = mailer.last().await.unwrap();
    assert_eq!(confirmation.subject, "Your email has been verified");
}

#[tokio::test]
async fn test_register_verify_accepts_surrounding_whitespace() {
    let (auth, _repo, mailer) = service();

    auth.register_start("user@example.com", "Passw0rd!", None, None)
        .await
        .unwrap();
    let otp = extract_otp(&mailer.last().await.unwrap().html);

    let session = auth
        .register_verify("user@example.com", &format!("  {}  ", otp))
        .await
        .unwrap();
    assert!(session.user.is_email_verified);
}

#[tokio::test]
async fn test_register_verify_counts_failed_attempts() {
    let (auth, repo, mailer) = service();

    auth.register_start("user@example.com", "Passw0rd!", None, None)
        .await
        .unwrap();
    let otp = extract_otp(&mailer.last().await.unwrap().html);
    let wrong = if otp == "0000" { "1111" } else { "0000" };

    let err = auth
        .register_verify("user@example.com", wrong)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::InvalidOtp)));

    let stored = repo
        .find_by_email("user@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.otp_attempts, 1);
}

#[tokio::test]
async fn test_register_verify_locks_after_five_wrong_attempts() {
    let (auth, _repo, mailer) = service();

    auth.register_start("user@example.com", "Passw0rd!", None, None)
        .await
        .unwrap();
    let otp = extract_otp(&mailer.last().await.unwrap().html);
    let wrong = if otp == "0000" { "1111" } else { "0000" };

    for _ in 0..5 {
        let err = auth
            .register_verify("user@example.com", wrong)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Auth(AuthError::InvalidOtp)));
    }

    // even the correct code is refused now
    let err = auth
        .register_verify("user@example.com", &otp)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::TooManyOtpAttempts)
    ));
}

#[tokio::test]
async fn test_register_verify_rejects_expired_code() {
    let (auth, repo, mailer) = service();

    auth.register_start("user@example.com", "Passw0rd!", None, None)
        .await
        .unwrap();
    let otp = extract_otp(&mailer.last().await.unwrap().html);

    let mut user = repo
        .find_by_email("user@example.com")
        .await
        .unwrap()
        .unwrap();
    user.otp_expires_at = Some(Utc::now() - Duration::seconds(1));
    repo.insert(user).await;

    let err = auth
        .register_verify("user@example.com", &otp)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::OtpExpired)));
}

#[tokio::test]
async fn test_register_verify_without_pending_code() {
    let (auth, repo, _mailer) = service();
    repo.insert(crate::domain::entities::user::User::new(
        "bare@example.com".to_string(),
        "hash".to_string(),
    ))
    .await;

    let err = auth
        .register_verify("bare@example.com", "1234")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::OtpNotRequested)));
}

#[tokio::test]
async fn test_register_verify_is_idempotent_once_verified() {
    let (auth, _repo, mailer) = service();
    registered(&auth, &mailer, "user@example.com").await;

    // any code is accepted once the account is verified
    let session = auth
        .register_verify("user@example.com", "0000")
        .await
        .unwrap();
    assert!(session.user.is_email_verified);
    assert!(!session.access_token.is_empty());
}

#[tokio::test]
async fn test_login_rejects_unknown_email() {
    let (auth, _repo, _mailer) = service();

    let err = auth
        .login("ghost@example.com", "Passw0rd!")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_login_requires_verified_email() {
    let (auth, _repo, _mailer) = service();
    auth.register_start("user@example.com", "Passw0rd!", None, None)
        .await
        .unwrap();

    let err = auth.login("user@example.com", "Passw0rd!").await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::EmailNotVerified)));
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let (auth, _repo, mailer) = service();
    registered(&auth, &mailer, "user@example.com").await;

    let err = auth.login("user@example.com", "WrongPass1").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_login_returns_session_for_verified_account() {
    let (auth, _repo, mailer) = service();
    registered(&auth, &mailer, "user@example.com").await;

    let session = auth.login("User@Example.com", "Passw0rd!").await.unwrap();

    assert_eq!(session.user.email, "user@example.com");
    assert!(!session.access_token.is_empty());
}

#[tokio::test]
async fn test_forgot_password_unknown_email_is_not_found() {
    let (auth, _repo, _mailer) = service();

    let err = auth.forgot_password("ghost@example.com").await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::AccountNotFound)));
}

#[tokio::test]
async fn test_forgot_password_emails_encoded_reset_link() {
    let (auth, repo, mailer) = service();
    registered(&auth, &mailer, "user@example.com").await;

    auth.forgot_password("user@example.com").await.unwrap();

    let email = mailer.last().await.unwrap();
    assert_eq!(email.subject, "Reset your Manzil password");
    assert!(email
        .html
        .contains("/reset-password?email=user%40example.com&token="));
    assert_eq!(extract_reset_token(&email.html).len(), 64);

    let stored = repo
        .find_by_email("user@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(stored.has_pending_reset_token());
}

#[tokio::test]
async fn test_reset_password_allows_login_with_new_password() {
    let (auth, _repo, mailer) = service();
    registered(&auth, &mailer, "user@example.com").await;

    auth.forgot_password("user@example.com").await.unwrap();
    let token = extract_reset_token(&mailer.last().await.unwrap().html);

    auth.reset_password("user@example.com", &token, "Fresh0ne!")
        .await
        .unwrap();

    assert!(auth.login("user@example.com", "Passw0rd!").await.is_err());
    assert!(auth.login("user@example.com", "Fresh0ne!").await.is_ok());
}

#[tokio::test]
async fn test_reset_password_rejects_wrong_token() {
    let (auth, _repo, mailer) = service();
    registered(&auth, &mailer, "user@example.com").await;
    auth.forgot_password("user@example.com").await.unwrap();

    let err = auth
        .reset_password("user@example.com", &"0".repeat(64), "Fresh0ne!")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::InvalidResetToken)
    ));
}

#[tokio::test]
async fn test_reset_password_rejects_expired_token() {
    let (auth, repo, mailer) = service();
    registered(&auth, &mailer, "user@example.com").await;
    auth.forgot_password("user@example.com").await.unwrap();
    let token = extract_reset_token(&mailer.last().await.unwrap().html);

    let mut user = repo
        .find_by_email("user@example.com")
        .await
        .unwrap()
        .unwrap();
    user.reset_token_expires_at = Some(Utc::now() - Duration::seconds(1));
    repo.insert(user).await;

    let err = auth
        .reset_password("user@example.com", &token, "Fresh0ne!")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::ResetTokenExpired)
    ));
}

#[tokio::test]
async fn test_reset_token_is_single_use() {
    let (auth, _repo, mailer) = service();
    registered(&auth, &mailer, "user@example.com").await;
    auth.forgot_password("user@example.com").await.unwrap();
    let token = extract_reset_token(&mailer.last().await.unwrap().html);

    auth.reset_password("user@example.com", &token, "Fresh0ne!")
        .await
        .unwrap();

    let err = auth
        .reset_password("user@example.com", &token, "An0therOne!")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::ResetTokenExpired)
    ));
}

#[tokio::test]
async fn test_me_returns_current_user() {
    let (auth, _repo, mailer) = service();
    registered(&auth, &mailer, "user@example.com").await;
    let session = auth.login("user@example.com", "Passw0rd!").await.unwrap();

    let user = auth.me(session.user.id).await.unwrap();
    assert_eq!(user.email, "user@example.com");
}

#[tokio::test]
async fn test_me_unknown_user_rejected() {
    let (auth, _repo, _mailer) = service();

    let err = auth.me(uuid::Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Auth(AuthError::InvalidCredentials)
    ));
}
