//! Maps domain errors onto HTTP status codes and the shared error envelope.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use validator::ValidationErrors;

use mz_core::errors::{AuthError, DomainError, PropertyError, TokenError};
use mz_shared::errors::{error_codes, ErrorResponse};

/// Error type returned by all handlers.
///
/// Domain errors keep their message on the wire; infrastructure failures
/// are logged in full and answered with a generic message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Validation failed")]
    Validation(#[from] ValidationErrors),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(error) => match error {
                DomainError::Auth(auth) => match auth {
                    AuthError::InvalidCredentials | AuthError::EmailNotVerified => {
                        StatusCode::UNAUTHORIZED
                    }
                    AuthError::EmailAlreadyRegistered => StatusCode::CONFLICT,
                    AuthError::AccountNotFound => StatusCode::NOT_FOUND,
                    AuthError::UnknownEmail
                    | AuthError::OtpNotRequested
                    | AuthError::InvalidOtp
                    | AuthError::OtpExpired
                    | AuthError::TooManyOtpAttempts
                    | AuthError::InvalidResetToken
                    | AuthError::ResetTokenExpired => StatusCode::BAD_REQUEST,
                },
                DomainError::Token(token) => match token {
                    TokenError::TokenExpired | TokenError::InvalidToken => StatusCode::UNAUTHORIZED,
                    TokenError::GenerationFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                },
                DomainError::Property(property) => match property {
                    PropertyError::NotFound => StatusCode::NOT_FOUND,
                    _ => StatusCode::BAD_REQUEST,
                },
                DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
                DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
                DomainError::Validation { .. } | DomainError::BusinessRule { .. } => {
                    StatusCode::BAD_REQUEST
                }
                DomainError::Database { .. }
                | DomainError::Mail { .. }
                | DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }

        HttpResponse::build(status).json(self.to_envelope())
    }
}

impl ApiError {
    fn to_envelope(&self) -> ErrorResponse {
        match self {
            ApiError::Validation(errors) => {
                let mut envelope =
                    ErrorResponse::new(error_codes::VALIDATION_ERROR, "Validation failed");
                for (field, issues) in errors.field_errors() {
                    let messages: Vec<String> = issues
                        .iter()
                        .map(|issue| {
                            issue
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| issue.code.to_string())
                        })
                        .collect();
                    envelope = envelope.add_detail(field, messages);
                }
                envelope
            }
            ApiError::Domain(error) => {
                ErrorResponse::new(Self::code_for(error), Self::message_for(error))
            }
        }
    }

    fn code_for(error: &DomainError) -> &'static str {
        match error {
            DomainError::Auth(auth) => match auth {
                AuthError::InvalidCredentials | AuthError::EmailNotVerified => {
                    error_codes::UNAUTHORIZED
                }
                AuthError::EmailAlreadyRegistered => error_codes::CONFLICT,
                AuthError::AccountNotFound => error_codes::NOT_FOUND,
                _ => error_codes::BAD_REQUEST,
            },
            DomainError::Token(TokenError::TokenExpired) => error_codes::TOKEN_EXPIRED,
            DomainError::Token(TokenError::InvalidToken) => error_codes::TOKEN_INVALID,
            DomainError::Token(TokenError::GenerationFailed { .. }) => error_codes::INTERNAL_ERROR,
            DomainError::Property(PropertyError::NotFound) => error_codes::NOT_FOUND,
            DomainError::Property(_) => error_codes::BAD_REQUEST,
            DomainError::Unauthorized => error_codes::UNAUTHORIZED,
            DomainError::NotFound { .. } => error_codes::NOT_FOUND,
            DomainError::Validation { .. } => error_codes::VALIDATION_ERROR,
            DomainError::BusinessRule { .. } => error_codes::BAD_REQUEST,
            DomainError::Database { .. } => error_codes::DATABASE_ERROR,
            DomainError::Mail { .. } => error_codes::MAIL_ERROR,
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
        }
    }

    /// Wire message; 5xx variants get a generic line so internals never leak
    fn message_for(error: &DomainError) -> String {
        match error {
            DomainError::Database { .. } => "A database error occurred".to_string(),
            DomainError::Mail { .. } => "Failed to send email".to_string(),
            DomainError::Internal { .. } | DomainError::Token(TokenError::GenerationFailed { .. }) => {
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        }
    }
}
