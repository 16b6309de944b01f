use actix_web::{HttpResponse, Result, web};
use serde::Serialize;

use crate::{
    AppState,
    database::RosterStore,
    handlers::shared::ApiResponse,
    services::{
        mappers::{Dancer, Team},
        sample,
        search::{SearchFilters, SearchState},
    },
};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DirectorySource {
    Live,
    Sample,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryResponse {
    pub dancers: Vec<Dancer>,
    pub teams: Vec<Team>,
    pub total_results: usize,
    pub filters: SearchFilters,
    pub source: DirectorySource,
}

pub async fn get_directory<S: RosterStore>(
    state: web::Data<AppState<S>>,
    filters: web::Query<SearchFilters>,
) -> Result<HttpResponse> {
    let (dancers, teams) = state.fetcher.fetch_directory().await;

    let (dancers, teams, source) = if dancers.is_empty() && teams.is_empty() {
        log::warn!("Directory is empty, serving sample roster");
        (sample::dancers(), sample::teams(), DirectorySource::Sample)
    } else {
        (dancers, teams, DirectorySource::Live)
    };

    let search = SearchState::with_filters(dancers, teams, filters.into_inner());
    let total_results = search.total_results();
    let (dancers, teams, filters) = search.into_results();

    Ok(ApiResponse::ok(DirectoryResponse {
        dancers,
        teams,
        total_results,
        filters,
        source,
    }))
}
