use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use folio_db::KvStore;
use folio_types::models::{ContactMessage, RateLimitWindow};

use crate::clock::{Clock, SystemClock};
use crate::error::SendError;
use crate::keys;
use crate::policy::GatePolicy;
use crate::transport::Transport;
use crate::vault::CredentialVault;

/// Single entry point for outbound contact messages.
///
/// Checks run in a fixed order and stop at the first failure:
/// 1. credentials configured, else `NotConfigured` (no quota spent)
/// 2. window has room, else `RateLimited`; otherwise the slot is taken
/// 3. credentials still complete, else `NotConfigured` (slot stays taken)
/// 4. transport send, failure is `Transport` (slot stays taken)
///
/// Calls are serialized: a second `attempt_send` waits until the first has
/// finished, transport round-trip included. Store reads and writes run on
/// the blocking pool.
pub struct SendGate {
    store: Arc<dyn KvStore>,
    vault: Arc<CredentialVault>,
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
    policy: GatePolicy,
    recipient: String,
    /// Held for the whole attempt. Caches the last window so the limit
    /// still applies when the store cannot be read.
    in_flight: Mutex<Option<RateLimitWindow>>,
}

impl SendGate {
    pub fn new(
        store: Arc<dyn KvStore>,
        vault: Arc<CredentialVault>,
        transport: Arc<dyn Transport>,
        recipient: impl Into<String>,
    ) -> Self {
        Self {
            store,
            vault,
            transport,
            clock: Arc::new(SystemClock),
            policy: GatePolicy::default(),
            recipient: recipient.into(),
            in_flight: Mutex::new(None),
        }
    }

    pub fn with_policy(mut self, policy: GatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub async fn attempt_send(&self, message: &ContactMessage) -> Result<(), SendError> {
        let mut cached = self.in_flight.lock().await;

        let vault = self.vault.clone();
        if !offload(move || vault.is_configured()).await? {
            return Err(SendError::NotConfigured);
        }

        let store = self.store.clone();
        let policy = self.policy;
        let now = self.clock.now_millis();
        let previous = *cached;
        match offload(move || take_slot(store.as_ref(), policy, now, previous)).await? {
            Some(window) => *cached = Some(window),
            None => {
                warn!(
                    "Contact rate limit reached ({} per {:?})",
                    self.policy.max_emails, self.policy.window
                );
                return Err(SendError::RateLimited);
            }
        }

        let vault = self.vault.clone();
        let credentials = match offload(move || vault.load()).await? {
            Some(c) if c.is_complete() => c,
            _ => {
                warn!("Credentials became incomplete after a slot was taken");
                return Err(SendError::NotConfigured);
            }
        };

        let payload = message.clone().into_payload(&self.recipient);
        self.transport
            .send(&credentials, &payload)
            .await
            .map_err(|e| {
                error!("Email transport error: {:#}", e);
                SendError::Transport(format!("{:#}", e))
            })?;

        debug!("Contact message dispatched");
        Ok(())
    }
}

/// Run synchronous store work on the blocking pool.
async fn offload<F, T>(f: F) -> Result<T, SendError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        SendError::Transport(format!("gate task failed: {}", e))
    })
}

/// Count one send against the current window. Returns the updated window,
/// or `None` without writing anything when the window is full. `previous`
/// stands in for the stored window when the store cannot be read.
fn take_slot(
    store: &dyn KvStore,
    policy: GatePolicy,
    now: i64,
    previous: Option<RateLimitWindow>,
) -> Option<RateLimitWindow> {
    let window_ms = policy.window_millis();

    let mut window = match read_window(store) {
        Ok(Some(window)) => window,
        Ok(None) => RateLimitWindow::fresh(now, window_ms),
        Err(e) => {
            warn!("Rate limit store unavailable, using cached window: {:#}", e);
            previous.unwrap_or_else(|| RateLimitWindow::fresh(now, window_ms))
        }
    };

    if window.is_expired(now) {
        window = RateLimitWindow::fresh(now, window_ms);
    }

    if window.count >= policy.max_emails {
        return None;
    }

    window.count += 1;
    if let Err(e) = write_window(store, &window) {
        warn!("Failed to persist rate limit window: {:#}", e);
    }
    Some(window)
}

fn read_window(store: &dyn KvStore) -> anyhow::Result<Option<RateLimitWindow>> {
    let Some(raw) = store.get(keys::RATE_LIMIT)? else {
        return Ok(None);
    };
    match serde_json::from_slice(&raw) {
        Ok(window) => Ok(Some(window)),
        Err(e) => {
            warn!("Discarding corrupt rate limit window: {}", e);
            Ok(None)
        }
    }
}

fn write_window(store: &dyn KvStore, window: &RateLimitWindow) -> anyhow::Result<()> {
    let encoded = serde_json::to_vec(window)?;
    store.set(keys::RATE_LIMIT, &encoded)
}
