use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;
use tracing::warn;

use folio_db::KvStore;
use folio_types::models::EngagementCounters;

use crate::keys;

/// Result of a like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeOutcome {
    pub counters: EngagementCounters,
    pub liked: bool,
}

/// Counts held in memory while the store is failing.
#[derive(Debug, Default)]
struct Local {
    counters: EngagementCounters,
    liked: bool,
}

/// View and like counters for one client.
///
/// Store failures never reach the caller: they are logged and the operation
/// falls back to an in-memory state that starts from zero.
pub struct CounterStore {
    store: Arc<dyn KvStore>,
    local: Mutex<Local>,
}

impl CounterStore {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            store,
            local: Mutex::new(Local::default()),
        }
    }

    /// Count one page load.
    pub fn record_view(&self) -> EngagementCounters {
        let mut local = self.lock_local();

        let persisted = self.read_counters().map(|stored| match stored {
            Some(mut counters) => {
                counters.view_count = counters.view_count.saturating_add(1);
                counters
            }
            None => EngagementCounters::first_view(),
        });

        match persisted.and_then(|counters| self.write_counters(counters).map(|_| counters)) {
            Ok(counters) => {
                local.counters = counters;
                counters
            }
            Err(e) => {
                warn!("Counter store unavailable, counting view in memory: {:#}", e);
                local.counters.view_count = local.counters.view_count.saturating_add(1);
                local.counters
            }
        }
    }

    /// Flip the like flag and move the like count with it.
    pub fn toggle_like(&self) -> LikeOutcome {
        let mut local = self.lock_local();

        match self.toggle_persisted() {
            Ok(outcome) => {
                local.counters = outcome.counters;
                local.liked = outcome.liked;
                outcome
            }
            Err(e) => {
                warn!("Counter store unavailable, toggling like in memory: {:#}", e);
                local.liked = !local.liked;
                local.counters.like_count = adjust_likes(local.counters.like_count, local.liked);
                LikeOutcome {
                    counters: local.counters,
                    liked: local.liked,
                }
            }
        }
    }

    /// Current counters without touching them.
    pub fn snapshot(&self) -> EngagementCounters {
        match self.read_counters() {
            Ok(counters) => counters.unwrap_or_default(),
            Err(e) => {
                warn!("Counter store unavailable, reporting in-memory counters: {:#}", e);
                self.lock_local().counters
            }
        }
    }

    /// Whether this client currently likes the page.
    pub fn is_liked(&self) -> bool {
        match self.read_liked() {
            Ok(liked) => liked,
            Err(e) => {
                warn!("Counter store unavailable, reporting in-memory like flag: {:#}", e);
                self.lock_local().liked
            }
        }
    }

    fn toggle_persisted(&self) -> Result<LikeOutcome> {
        let liked = !self.read_liked()?;
        let mut counters = self.read_counters()?.unwrap_or_default();
        counters.like_count = adjust_likes(counters.like_count, liked);

        let encoded = serde_json::to_vec(&counters)?;
        let flag: &[u8] = if liked { b"true" } else { b"false" };
        self.store
            .set_many(&[(keys::STATS, encoded.as_slice()), (keys::LIKED, flag)])?;

        Ok(LikeOutcome { counters, liked })
    }

    /// `Ok(None)` for both missing and unparseable counters.
    fn read_counters(&self) -> Result<Option<EngagementCounters>> {
        let Some(raw) = self.store.get(keys::STATS)? else {
            return Ok(None);
        };
        match serde_json::from_slice(&raw) {
            Ok(counters) => Ok(Some(counters)),
            Err(e) => {
                warn!("Discarding corrupt counters: {}", e);
                Ok(None)
            }
        }
    }

    fn write_counters(&self, counters: EngagementCounters) -> Result<()> {
        let encoded = serde_json::to_vec(&counters)?;
        self.store.set(keys::STATS, &encoded)
    }

    fn read_liked(&self) -> Result<bool> {
        let raw = self.store.get(keys::LIKED)?;
        Ok(raw.as_deref() == Some(b"true".as_slice()))
    }

    fn lock_local(&self) -> MutexGuard<'_, Local> {
        // The guarded data is plain counters; a panic elsewhere cannot leave it torn.
        self.local.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn adjust_likes(likes: u64, liked: bool) -> u64 {
    if liked {
        likes.saturating_add(1)
    } else {
        likes.saturating_sub(1)
    }
}
