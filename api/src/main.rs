//! Binary entry point: configuration, dependency wiring and the HTTP server.

use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mz_api::app::{create_app, AppState};
use mz_core::services::auth::{AuthService, AuthServiceConfig};
use mz_core::services::property::{PropertyService, PropertyServiceConfig};
use mz_core::services::token::{TokenService, TokenServiceConfig};
use mz_infra::{
    DatabasePool, PgCatalogRepository, PgPropertyRepository, PgUserRepository, SmtpMailer,
};
use mz_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = AppConfig::from_env();

    // RUST_LOG wins; the configured level is the fallback.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_ansi(config.logging.colored)
        .init();

    info!(
        environment = %config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "starting manzil-api"
    );

    let db = DatabasePool::new(config.database.clone()).await?;
    db.run_migrations().await?;

    let property_repository = Arc::new(PgPropertyRepository::new(db.pool().clone()));
    let catalog_repository = Arc::new(PgCatalogRepository::new(db.pool().clone()));
    let user_repository = Arc::new(PgUserRepository::new(db.pool().clone()));

    let mailer = Arc::new(SmtpMailer::new(&config.mail)?);

    let token_service = Arc::new(TokenService::new(TokenServiceConfig::new(
        config.auth.jwt.secret.clone(),
        config.auth.jwt.access_token_expiry,
    )));

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repository),
        Arc::clone(&token_service),
        Arc::clone(&mailer),
        AuthServiceConfig {
            otp_secret: config.auth.otp_secret.clone(),
            bcrypt_cost: config.auth.bcrypt_cost,
            frontend_origin: config.mail.frontend_origin.clone(),
            ..AuthServiceConfig::default()
        },
    ));

    let property_service = Arc::new(PropertyService::new(
        property_repository,
        catalog_repository,
        user_repository,
        Arc::clone(&mailer),
        PropertyServiceConfig {
            frontend_origin: config.mail.frontend_origin.clone(),
            ..PropertyServiceConfig::default()
        },
    ));

    let app_state = web::Data::new(AppState {
        auth_service,
        property_service,
        token_service,
    });

    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    let keep_alive = Duration::from_secs(config.server.keep_alive);
    info!(%bind_address, "manzil-api listening");

    let app_config = config.clone();
    let server = HttpServer::new(move || create_app(app_state.clone(), &app_config))
        .keep_alive(keep_alive);

    // workers == 0 keeps the Actix default of one worker per core
    let server = if workers > 0 {
        server.workers(workers)
    } else {
        server
    };

    server.bind(&bind_address)?.run().await?;
    Ok(())
}
