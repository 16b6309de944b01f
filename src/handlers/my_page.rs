use actix_web::{HttpResponse, Result, web};
use uuid::Uuid;

use crate::{
    AppState,
    database::{RosterStore, models::CareerEntryInput},
    error::AppError,
    handlers::shared::ApiResponse,
    services::{AuthUser, SessionState},
};

pub async fn get_my_page<S: RosterStore>(
    state: web::Data<AppState<S>>,
    user: AuthUser,
) -> Result<HttpResponse> {
    let page = state
        .fetcher
        .fetch_my_page(user.user_id())
        .await
        .map_err(AppError::from)?;

    Ok(ApiResponse::ok(page))
}

pub async fn create_career<S: RosterStore>(
    state: web::Data<AppState<S>>,
    user: AuthUser,
    input: web::Json<CareerEntryInput>,
) -> Result<HttpResponse> {
    let entry = input.into_inner().validate().map_err(AppError::from)?;

    let created = state
        .fetcher
        .store()
        .create_career(user.user_id(), &entry)
        .await
        .map_err(AppError::from)?;

    log::info!(
        "User {} added {} entry {}",
        user.user_id(),
        entry.category,
        created.id
    );
    Ok(ApiResponse::created(created))
}

pub async fn delete_career<S: RosterStore>(
    state: web::Data<AppState<S>>,
    user: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let career_id = path.into_inner();

    let deleted = state
        .fetcher
        .store()
        .delete_career(career_id, user.user_id())
        .await
        .map_err(AppError::from)?;

    if !deleted {
        return Err(AppError::NotFound("Career entry not found".to_string()).into());
    }

    log::info!("User {} deleted career entry {}", user.user_id(), career_id);
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Career entry deleted",
    )))
}

pub async fn sign_out(session: web::Data<SessionState>, user: AuthUser) -> Result<HttpResponse> {
    session.sign_out(user.user_id());
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Signed out",
    )))
}
