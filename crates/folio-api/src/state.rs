use std::sync::Arc;

use tracing::error;

use folio_core::{CounterStore, CredentialVault, SendGate};

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub counters: CounterStore,
    pub vault: Arc<CredentialVault>,
    pub gate: SendGate,
    /// Bearer token for the admin routes. `None` locks them entirely.
    pub admin_token: Option<String>,
}

/// Run synchronous store work off the async runtime.
pub async fn blocking<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&AppStateInner) -> T + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(state.as_ref()))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal
        })
}
