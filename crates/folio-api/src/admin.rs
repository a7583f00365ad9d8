use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};

use folio_types::api::{CredentialsQuery, CredentialsResponse, SaveCredentialsRequest};
use folio_types::models::{MessagingCredentials, mask};

use crate::error::ApiError;
use crate::state::{AppState, blocking};

/// Current credentials for the admin dialog, masked unless `reveal=true`.
pub async fn get_credentials(
    State(state): State<AppState>,
    Query(query): Query<CredentialsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let credentials = blocking(&state, |s| s.vault.load())
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(render(&credentials, query.reveal)))
}

pub async fn save_credentials(
    State(state): State<AppState>,
    Json(req): Json<SaveCredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let credentials = MessagingCredentials::new(req.public_key, req.service_id, req.template_id);

    let saved = credentials.clone();
    blocking(&state, move |s| s.vault.save(&saved)).await??;

    Ok(Json(render(&credentials, false)))
}

fn render(credentials: &MessagingCredentials, reveal: bool) -> CredentialsResponse {
    let show = |value: &str| {
        if reveal {
            value.to_string()
        } else {
            mask(value)
        }
    };

    CredentialsResponse {
        configured: credentials.is_complete(),
        revealed: reveal,
        public_key: show(&credentials.public_key),
        service_id: show(&credentials.service_id),
        template_id: show(&credentials.template_id),
    }
}
