use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use folio_core::{SendError, ValidationError, VaultError};
use folio_types::api::ErrorResponse;

#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationError),
    Send(SendError),
    Unauthorized,
    NotFound,
    Internal,
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation(e)
    }
}

impl From<SendError> for ApiError {
    fn from(e: SendError) -> Self {
        ApiError::Send(e)
    }
}

impl From<VaultError> for ApiError {
    fn from(e: VaultError) -> Self {
        match e {
            VaultError::Validation(v) => ApiError::Validation(v),
            VaultError::Storage(e) => {
                error!("Credential storage failed: {:#}", e);
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match &self {
            ApiError::Validation(e) => (StatusCode::BAD_REQUEST, "validation", e.to_string()),
            ApiError::Send(e) => {
                let status = match e {
                    SendError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
                    SendError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
                    SendError::Transport(_) => StatusCode::BAD_GATEWAY,
                };
                (status, e.kind(), e.user_message().to_string())
            }
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Admin token required.".to_string(),
            ),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                "not_found",
                "Nothing stored yet.".to_string(),
            ),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal",
                "Something went wrong. Please try again.".to_string(),
            ),
        };

        (
            status,
            Json(ErrorResponse {
                kind: kind.to_string(),
                message,
            }),
        )
            .into_response()
    }
}
