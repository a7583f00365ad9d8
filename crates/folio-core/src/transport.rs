use anyhow::Result;
use async_trait::async_trait;

use folio_types::models::{EmailPayload, MessagingCredentials};

/// The third-party service that actually delivers contact messages.
///
/// Implementations receive complete credentials; the gate never calls
/// `send` with an empty field.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, credentials: &MessagingCredentials, payload: &EmailPayload) -> Result<()>;
}
