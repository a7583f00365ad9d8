mod config;
mod relay;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use folio_api::AppStateInner;
use folio_core::{CounterStore, CredentialVault, SendGate};
use folio_db::{Database, KvStore};

use crate::config::Config;
use crate::relay::RelayTransport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    if config.admin_token.is_none() {
        warn!("FOLIO_ADMIN_TOKEN is not set; admin routes are disabled");
    }
    if config.contact_email.is_empty() {
        warn!("FOLIO_CONTACT_EMAIL is not set; contact messages will have no recipient");
    }

    // Init storage
    let store: Arc<dyn KvStore> = Arc::new(Database::open(&config.db_path)?);

    let vault = Arc::new(CredentialVault::new(store.clone()));
    let transport = Arc::new(RelayTransport::new(&config.relay_url)?);
    let gate = SendGate::new(store.clone(), vault.clone(), transport, &config.contact_email)
        .with_policy(config.policy);

    info!(
        "Contact rate limit: {} per {:?}",
        config.policy.max_emails, config.policy.window
    );

    let state = Arc::new(AppStateInner {
        counters: CounterStore::new(store),
        vault,
        gate,
        admin_token: config.admin_token.clone(),
    });

    let app = folio_api::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Folio server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
