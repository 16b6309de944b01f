use actix_web::{HttpResponse, Result, web};
use serde::Deserialize;

use crate::{
    AppState, database::RosterStore, error::AppError, handlers::shared::ApiResponse,
};

pub const DEFAULT_FEATURED_LIMIT: usize = 8;
pub const MAX_FEATURED_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
pub struct FeaturedQuery {
    pub limit: Option<usize>,
}

pub async fn list_artists<S: RosterStore>(state: web::Data<AppState<S>>) -> Result<HttpResponse> {
    let dancers = state.fetcher.fetch_dancers().await;
    Ok(ApiResponse::ok(dancers))
}

pub async fn featured_artists<S: RosterStore>(
    state: web::Data<AppState<S>>,
    query: web::Query<FeaturedQuery>,
) -> Result<HttpResponse> {
    let limit = match query.limit {
        Some(0) => return Err(AppError::BadRequest("limit must be at least 1".to_string()).into()),
        Some(limit) => limit.min(MAX_FEATURED_LIMIT),
        None => DEFAULT_FEATURED_LIMIT,
    };

    let dancers = state.fetcher.fetch_featured_dancers(limit).await;
    Ok(ApiResponse::ok(dancers))
}

pub async fn get_artist<S: RosterStore>(
    state: web::Data<AppState<S>>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let slug = path.into_inner();

    let profile = state
        .fetcher
        .fetch_dancer_profile(&slug)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("Artist not found".to_string()))?;

    Ok(ApiResponse::ok(profile))
}
