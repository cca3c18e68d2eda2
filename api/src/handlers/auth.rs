//! Authentication handlers.
//!
//! Every handler validates its DTO, delegates to the auth service and
//! re-shapes the result for the wire. POST endpoints answer 201 to match
//! the original frontend contract.

use actix_web::{web, HttpResponse};
use validator::Validate;

use mz_core::repositories::{CatalogRepository, PropertyRepository, UserRepository};
use mz_core::services::mailer::Mailer;

use crate::app::AppState;
use crate::dto::auth::{
    ForgotPasswordRequest, ForgotPasswordResponse, LoginRequest, MeResponse, RegisterStartRequest,
    RegisterStartResponse, RegisterVerifyRequest, ResendOtpRequest, ResendOtpResponse,
    ResetPasswordRequest, ResetPasswordResponse, SessionResponse, VerifiedSessionResponse,
};
use crate::handlers::error::ApiError;
use crate::middleware::auth::AuthContext;

/// POST /auth/register/start
pub async fn register_start<P, C, U, M>(
    state: web::Data<AppState<P, C, U, M>>,
    request: web::Json<RegisterStartRequest>,
) -> Result<HttpResponse, ApiError>
where
    P: PropertyRepository + 'static,
    C: CatalogRepository + 'static,
    U: UserRepository + 'static,
    M: Mailer + 'static,
{
    request.validate()?;
    let request = request.into_inner();

    let started = state
        .auth_service
        .register_start(
            &request.email,
            &request.password,
            Some(request.name),
            Some(request.phone),
        )
        .await?;

    Ok(HttpResponse::Created().json(RegisterStartResponse::from(started)))
}

/// POST /auth/register/verify
pub async fn register_verify<P, C, U, M>(
    state: web::Data<AppState<P, C, U, M>>,
    request: web::Json<RegisterVerifyRequest>,
) -> Result<HttpResponse, ApiError>
where
    P: PropertyRepository + 'static,
    C: CatalogRepository + 'static,
    U: UserRepository + 'static,
    M: Mailer + 'static,
{
    request.validate()?;

    let session = state
        .auth_service
        .register_verify(&request.email, &request.otp)
        .await?;

    Ok(HttpResponse::Created().json(VerifiedSessionResponse::from(session)))
}

/// POST /auth/register/resend
pub async fn resend_otp<P, C, U, M>(
    state: web::Data<AppState<P, C, U, M>>,
    request: web::Json<ResendOtpRequest>,
) -> Result<HttpResponse, ApiError>
where
    P: PropertyRepository + 'static,
    C: CatalogRepository + 'static,
    U: UserRepository + 'static,
    M: Mailer + 'static,
{
    request.validate()?;

    let resent = state.auth_service.resend_otp(&request.email).await?;

    Ok(HttpResponse::Created().json(ResendOtpResponse::from(resent)))
}

/// POST /auth/login
pub async fn login<P, C, U, M>(
    state: web::Data<AppState<P, C, U, M>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    P: PropertyRepository + 'static,
    C: CatalogRepository + 'static,
    U: UserRepository + 'static,
    M: Mailer + 'static,
{
    request.validate()?;

    let session = state
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    Ok(HttpResponse::Created().json(SessionResponse::from(session)))
}

/// POST /auth/password/forgot
pub async fn forgot_password<P, C, U, M>(
    state: web::Data<AppState<P, C, U, M>>,
    request: web::Json<ForgotPasswordRequest>,
) -> Result<HttpResponse, ApiError>
where
    P: PropertyRepository + 'static,
    C: CatalogRepository + 'static,
    U: UserRepository + 'static,
    M: Mailer + 'static,
{
    request.validate()?;

    state.auth_service.forgot_password(&request.email).await?;

    Ok(HttpResponse::Created().json(ForgotPasswordResponse { requested: true }))
}

/// POST /auth/password/reset
pub async fn reset_password<P, C, U, M>(
    state: web::Data<AppState<P, C, U, M>>,
    request: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, ApiError>
where
    P: PropertyRepository + 'static,
    C: CatalogRepository + 'static,
    U: UserRepository + 'static,
    M: Mailer + 'static,
{
    request.validate()?;

    state
        .auth_service
        .reset_password(&request.email, &request.token, &request.password)
        .await?;

    Ok(HttpResponse::Created().json(ResetPasswordResponse { reset: true }))
}

/// GET /auth/me (requires bearer token)
pub async fn me<P, C, U, M>(
    auth: AuthContext,
    state: web::Data<AppState<P, C, U, M>>,
) -> Result<HttpResponse, ApiError>
where
    P: PropertyRepository + 'static,
    C: CatalogRepository + 'static,
    U: UserRepository + 'static,
    M: Mailer + 'static,
{
    let user = state.auth_service.me(auth.user_id).await?;

    Ok(HttpResponse::Ok().json(MeResponse::from(user)))
}
