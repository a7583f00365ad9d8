use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

#[derive(Debug, Error)]
pub enum VaultError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to store credentials: {0}")]
    Storage(#[source] anyhow::Error),
}

/// Why a contact message was not sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    #[error("email credentials are not configured")]
    NotConfigured,

    #[error("rate limit exceeded")]
    RateLimited,

    #[error("transport failed: {0}")]
    Transport(String),
}

impl SendError {
    /// Short machine-readable tag for API clients.
    pub fn kind(&self) -> &'static str {
        match self {
            SendError::NotConfigured => "not_configured",
            SendError::RateLimited => "rate_limited",
            SendError::Transport(_) => "transport_error",
        }
    }

    /// Notification text shown to the visitor.
    pub fn user_message(&self) -> &'static str {
        match self {
            SendError::NotConfigured => {
                "The contact form is not available right now. Please reach out directly by email."
            }
            SendError::RateLimited => {
                "Rate limit exceeded. Please wait before sending another email."
            }
            SendError::Transport(_) => {
                "Failed to send email. Please try again or contact me directly."
            }
        }
    }
}
