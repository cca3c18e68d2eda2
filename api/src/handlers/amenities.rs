//! Amenity lookup handler.

use actix_web::{web, HttpResponse};

use mz_core::repositories::{CatalogRepository, PropertyRepository, UserRepository};
use mz_core::services::mailer::Mailer;

use crate::app::AppState;
use crate::handlers::error::ApiError;

/// GET /amenities
pub async fn list<P, C, U, M>(
    state: web::Data<AppState<P, C, U, M>>,
) -> Result<HttpResponse, ApiError>
where
    P: PropertyRepository + 'static,
    C: CatalogRepository + 'static,
    U: UserRepository + 'static,
    M: Mailer + 'static,
{
    let amenities = state.property_service.amenities().await?;

    Ok(HttpResponse::Ok().json(amenities))
}
