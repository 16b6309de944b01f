use actix_web::{HttpResponse, Result, web};

use crate::{
    AppState, database::RosterStore, error::AppError, handlers::shared::ApiResponse,
};

pub async fn list_teams<S: RosterStore>(state: web::Data<AppState<S>>) -> Result<HttpResponse> {
    let teams = state.fetcher.fetch_teams().await;
    Ok(ApiResponse::ok(teams))
}

pub async fn get_team<S: RosterStore>(
    state: web::Data<AppState<S>>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let slug = path.into_inner();

    let profile = state
        .fetcher
        .fetch_team_profile(&slug)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("Team not found".to_string()))?;

    Ok(ApiResponse::ok(profile))
}
