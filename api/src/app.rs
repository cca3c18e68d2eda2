//! Application state and factory.
//!
//! `create_app` assembles the Actix application from shared services so the
//! binary and the integration tests build the exact same route tree.

use std::sync::Arc;

use actix_web::error::InternalError;
use actix_web::{web, App, Error, HttpRequest, HttpResponse};
use tracing_actix_web::TracingLogger;

use mz_core::repositories::{CatalogRepository, PropertyRepository, UserRepository};
use mz_core::services::auth::AuthService;
use mz_core::services::mailer::Mailer;
use mz_core::services::property::PropertyService;
use mz_core::services::token::TokenService;
use mz_shared::config::AppConfig;
use mz_shared::errors::{error_codes, ErrorResponse};

use crate::handlers;
use crate::middleware::{create_cors, JwtAuth};

/// Shared services injected into every handler
pub struct AppState<P, C, U, M>
where
    P: PropertyRepository,
    C: CatalogRepository,
    U: UserRepository,
    M: Mailer,
{
    pub auth_service: Arc<AuthService<U, M>>,
    pub property_service: Arc<PropertyService<P, C, U, M>>,
    pub token_service: Arc<TokenService>,
}

/// Create and configure the application with all routes and middleware.
///
/// `/properties/metadata` and `/properties/featured` are registered before
/// `/properties/{id}` because the scope matches routes in registration
/// order.
pub fn create_app<P, C, U, M>(
    app_state: web::Data<AppState<P, C, U, M>>,
    config: &AppConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    P: PropertyRepository + 'static,
    C: CatalogRepository + 'static,
    U: UserRepository + 'static,
    M: Mailer + 'static,
{
    let cors = create_cors(&config.cors);
    let token_service = Arc::clone(&app_state.token_service);

    App::new()
        .app_data(app_state)
        .app_data(
            web::JsonConfig::default()
                .limit(config.server.max_payload_size)
                .error_handler(json_error_handler),
        )
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap(TracingLogger::default())
        .wrap(cors)
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/auth")
                .route(
                    "/register/start",
                    web::post().to(handlers::auth::register_start::<P, C, U, M>),
                )
                .route(
                    "/register/verify",
                    web::post().to(handlers::auth::register_verify::<P, C, U, M>),
                )
                .route(
                    "/register/resend",
                    web::post().to(handlers::auth::resend_otp::<P, C, U, M>),
                )
                .route("/login", web::post().to(handlers::auth::login::<P, C, U, M>))
                .route(
                    "/password/forgot",
                    web::post().to(handlers::auth::forgot_password::<P, C, U, M>),
                )
                .route(
                    "/password/reset",
                    web::post().to(handlers::auth::reset_password::<P, C, U, M>),
                )
                .route(
                    "/me",
                    web::get()
                        .to(handlers::auth::me::<P, C, U, M>)
                        .wrap(JwtAuth::new(Arc::clone(&token_service))),
                ),
        )
        .service(
            web::scope("/properties")
                .route(
                    "/metadata",
                    web::get().to(handlers::properties::metadata::<P, C, U, M>),
                )
                .route(
                    "/featured",
                    web::get().to(handlers::properties::featured::<P, C, U, M>),
                )
                .route("", web::get().to(handlers::properties::search::<P, C, U, M>))
                .route(
                    "",
                    web::post()
                        .to(handlers::properties::create::<P, C, U, M>)
                        .wrap(JwtAuth::new(Arc::clone(&token_service))),
                )
                .route(
                    "/{id}",
                    web::get().to(handlers::properties::get::<P, C, U, M>),
                )
                .route(
                    "/{id}/similar",
                    web::get().to(handlers::properties::similar::<P, C, U, M>),
                ),
        )
        .route(
            "/amenities",
            web::get().to(handlers::amenities::list::<P, C, U, M>),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "manzil-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}

fn json_error_handler(err: actix_web::error::JsonPayloadError, _req: &HttpRequest) -> Error {
    let envelope = ErrorResponse::new(error_codes::BAD_REQUEST, err.to_string());
    InternalError::from_response(err, HttpResponse::BadRequest().json(envelope)).into()
}

fn query_error_handler(err: actix_web::error::QueryPayloadError, _req: &HttpRequest) -> Error {
    let envelope = ErrorResponse::new(error_codes::BAD_REQUEST, err.to_string());
    InternalError::from_response(err, HttpResponse::BadRequest().json(envelope)).into()
}

fn path_error_handler(err: actix_web::error::PathError, _req: &HttpRequest) -> Error {
    let envelope = ErrorResponse::new(error_codes::BAD_REQUEST, err.to_string());
    InternalError::from_response(err, HttpResponse::BadRequest().json(envelope)).into()
}
