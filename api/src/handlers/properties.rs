//! Property handlers: search, lookups, metadata and creation.

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use mz_core::repositories::{CatalogRepository, PropertyRepository, UserRepository};
use mz_core::services::mailer::Mailer;

use crate::app::AppState;
use crate::dto::property::{CreatePropertyRequest, FeaturedQuery, ListingResponse, SearchQuery, SimilarQuery};
use crate::handlers::error::ApiError;
use crate::middleware::auth::AuthContext;

/// GET /properties
pub async fn search<P, C, U, M>(
    state: web::Data<AppState<P, C, U, M>>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, ApiError>
where
    P: PropertyRepository + 'static,
    C: CatalogRepository + 'static,
    U: UserRepository + 'static,
    M: Mailer + 'static,
{
    query.validate()?;

    let page = state
        .property_service
        .search(query.into_inner().into())
        .await?;

    Ok(HttpResponse::Ok().json(page.map(ListingResponse::from)))
}

/// GET /properties/metadata
pub async fn metadata<P, C, U, M>(
    state: web::Data<AppState<P, C, U, M>>,
) -> Result<HttpResponse, ApiError>
where
    P: PropertyRepository + 'static,
    C: CatalogRepository + 'static,
    U: UserRepository + 'static,
    M: Mailer + 'static,
{
    let metadata = state.property_service.metadata().await?;

    Ok(HttpResponse::Ok().json(metadata))
}

/// GET /properties/featured
pub async fn featured<P, C, U, M>(
    state: web::Data<AppState<P, C, U, M>>,
    query: web::Query<FeaturedQuery>,
) -> Result<HttpResponse, ApiError>
where
    P: PropertyRepository + 'static,
    C: CatalogRepository + 'static,
    U: UserRepository + 'static,
    M: Mailer + 'static,
{
    query.validate()?;

    let listings = state
        .property_service
        .featured(query.purpose, query.limit)
        .await?;

    let body: Vec<ListingResponse> = listings.into_iter().map(ListingResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /properties/{id}
pub async fn get<P, C, U, M>(
    state: web::Data<AppState<P, C, U, M>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError>
where
    P: PropertyRepository + 'static,
    C: CatalogRepository + 'static,
    U: UserRepository + 'static,
    M: Mailer + 'static,
{
    let property = state.property_service.get(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ListingResponse::from(property)))
}

/// GET /properties/{id}/similar
pub async fn similar<P, C, U, M>(
    state: web::Data<AppState<P, C, U, M>>,
    path: web::Path<Uuid>,
    query: web::Query<SimilarQuery>,
) -> Result<HttpResponse, ApiError>
where
    P: PropertyRepository + 'static,
    C: CatalogRepository + 'static,
    U: UserRepository + 'static,
    M: Mailer + 'static,
{
    let listings = state
        .property_service
        .similar(path.into_inner(), query.limit)
        .await?;

    let body: Vec<ListingResponse> = listings.into_iter().map(ListingResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /properties (requires bearer token)
pub async fn create<P, C, U, M>(
    auth: AuthContext,
    state: web::Data<AppState<P, C, U, M>>,
    request: web::Json<CreatePropertyRequest>,
) -> Result<HttpResponse, ApiError>
where
    P: PropertyRepository + 'static,
    C: CatalogRepository + 'static,
    U: UserRepository + 'static,
    M: Mailer + 'static,
{
    request.validate()?;

    let created = state
        .property_service
        .create(auth.user_id, request.into_inner().into_draft())
        .await?;

    Ok(HttpResponse::Created().json(ListingResponse::from(created)))
}
