//! Single-flight cache for option lists shared across tables and forms.
//!
//! Built once at application start and handed out behind an `Arc`.
//! Concurrent `get_or_load` calls for the same key share one load. A failed
//! load is never stored; the next caller runs its own loader.

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OnceCell};
use tokio::time::Instant;
use tracing::{debug, info};

/// Configuration for an [`OptionsCache`].
#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    /// Entries older than this are reloaded. `None` keeps them until
    /// invalidated.
    pub max_age: Option<Duration>,
}

struct Entry<V> {
    value: Arc<V>,
    loaded_at: Instant,
}

type Slot<V> = Arc<OnceCell<Entry<V>>>;

/// Keyed get-or-load cache with single-flight loading.
pub struct OptionsCache<K, V> {
    slots: Mutex<HashMap<K, Slot<V>>>,
    config: CacheConfig,
}

impl<K, V> Default for OptionsCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl<K, V> OptionsCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Creates an empty cache.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Returns the cached value for `key`, loading it with `loader` if it is
    /// missing or expired.
    pub async fn get_or_load<F, Fut, E>(&self, key: K, loader: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let slot = self.slot(&key).await;

        let entry = slot
            .get_or_try_init(|| async {
                info!(key = ?key, "Loading options");
                let value = loader().await?;
                Ok::<_, E>(Entry {
                    value: Arc::new(value),
                    loaded_at: Instant::now(),
                })
            })
            .await?;

        Ok(Arc::clone(&entry.value))
    }

    /// Returns the cached value without loading.
    pub async fn peek(&self, key: &K) -> Option<Arc<V>> {
        let slots = self.slots.lock().await;
        let entry = slots.get(key)?.get()?;
        if self.is_expired(entry) {
            return None;
        }
        Some(Arc::clone(&entry.value))
    }

    /// Drops `key` so the next `get_or_load` reloads it. A load already in
    /// flight still completes for its waiters but is not kept.
    pub async fn invalidate(&self, key: &K) -> bool {
        let removed = self.slots.lock().await.remove(key).is_some();
        if removed {
            debug!(key = ?key, "Options invalidated");
        }
        removed
    }

    /// Drops every entry.
    pub async fn clear(&self) {
        self.slots.lock().await.clear();
    }

    /// Number of keys with a slot (loaded or loading).
    pub async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn slot(&self, key: &K) -> Slot<V> {
        let mut slots = self.slots.lock().await;

        let expired = slots
            .get(key)
            .and_then(|slot| slot.get())
            .is_some_and(|entry| self.is_expired(entry));
        if expired {
            debug!(key = ?key, "Options expired");
            slots.remove(key);
        }

        match slots.get(key) {
            Some(slot) => {
                debug!(key = ?key, loaded = slot.initialized(), "Options cache hit");
                Arc::clone(slot)
            }
            None => {
                let slot: Slot<V> = Arc::new(OnceCell::new());
                slots.insert(key.clone(), Arc::clone(&slot));
                slot
            }
        }
    }

    fn is_expired(&self, entry: &Entry<V>) -> bool {
        self.config
            .max_age
            .is_some_and(|max_age| entry.loaded_at.elapsed() >= max_age)
    }
}
