use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Result, bail};
use async_trait::async_trait;

use folio_db::KvStore;
use folio_types::models::{EmailPayload, MessagingCredentials};

use crate::transport::Transport;

/// Store whose every call fails, as when client storage is disabled.
pub struct FailingStore;

impl KvStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        bail!("storage unavailable")
    }

    fn set(&self, _key: &str, _value: &[u8]) -> Result<()> {
        bail!("storage unavailable")
    }
}

/// Delegates to an inner store, sleeping before every read so concurrent
/// read-modify-write sequences overlap.
pub struct SlowStore<S> {
    pub inner: S,
    pub delay: Duration,
}

impl<S: KvStore> KvStore for SlowStore<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        std::thread::sleep(self.delay);
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.inner.set(key, value)
    }
}

/// Transport that records what it was asked to send.
#[derive(Default)]
pub struct RecordingTransport {
    pub sent: Mutex<Vec<(MessagingCredentials, EmailPayload)>>,
    pub fail: bool,
}

impl RecordingTransport {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, credentials: &MessagingCredentials, payload: &EmailPayload) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((credentials.clone(), payload.clone()));
        if self.fail {
            bail!("provider returned 500");
        }
        Ok(())
    }
}
