use axum::{Json, extract::State, response::IntoResponse};

use folio_types::api::StatsResponse;

use crate::error::ApiError;
use crate::state::{AppState, blocking};

pub async fn get_stats(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let stats = blocking(&state, |s| {
        StatsResponse::new(s.counters.snapshot(), s.counters.is_liked())
    })
    .await?;

    Ok(Json(stats))
}

/// Called once per page mount.
pub async fn record_view(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let stats = blocking(&state, |s| {
        let counters = s.counters.record_view();
        StatsResponse::new(counters, s.counters.is_liked())
    })
    .await?;

    Ok(Json(stats))
}

pub async fn toggle_like(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let outcome = blocking(&state, |s| s.counters.toggle_like()).await?;

    Ok(Json(StatsResponse::new(outcome.counters, outcome.liked)))
}
