use axum::{Json, extract::State, response::IntoResponse};
use tracing::info;

use folio_core::ValidationError;
use folio_types::api::{ContactRequest, ContactResponse, ContactStatusResponse};
use folio_types::models::ContactMessage;

use crate::error::ApiError;
use crate::state::{AppState, blocking};

/// Lets the page swap the form for direct contact details when sending is
/// impossible.
pub async fn status(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let configured = blocking(&state, |s| s.vault.is_configured()).await?;

    Ok(Json(ContactStatusResponse { configured }))
}

pub async fn send_message(
    State(state): State<AppState>,
    Json(req): Json<ContactRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let message = ContactMessage {
        from_name: req.name,
        from_email: req.email,
        subject: req.subject,
        message: req.message,
    };

    // Every field is required before the message gets anywhere near the gate.
    if let Some(field) = message.missing_field() {
        return Err(ValidationError::MissingField(field).into());
    }

    state.gate.attempt_send(&message).await?;

    info!("Contact message sent");
    Ok(Json(ContactResponse {
        sent: true,
        message: "Thank you for your message. I'll get back to you soon.".to_string(),
    }))
}
