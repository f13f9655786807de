// ABOUTME: In-memory result cache with LRU eviction and TTL support
// ABOUTME: Includes background cleanup task for expired entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{CacheConfig, CachedResult};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

type Store = Arc<Mutex<LruCache<String, CacheEntry>>>;

/// Cache entry with expiration
#[derive(Debug, Clone)]
struct CacheEntry {
    result: CachedResult,
    expires_at: Instant,
}

impl CacheEntry {
    fn new(result: CachedResult, ttl: Duration) -> Self {
        Self {
            result,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Most recent summary per user, bounded in size and time
///
/// All operations are synchronous and hold the lock only for the duration of
/// a single map operation, so callers may use the cache from async code
/// without ever suspending. A write resets the entry's expiry. When the cache
/// is full and a new user arrives, expired entries are dropped first and the
/// least-recently-used entry goes only if none were expired.
///
/// Expiry is measured with [`tokio::time::Instant`], so a paused test clock
/// drives it.
pub struct ResultCache {
    store: Store,
    ttl: Duration,
    shutdown_tx: Option<mpsc::Sender<()>>,
}

impl ResultCache {
    /// Default cache capacity when config specifies zero entries
    const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(100) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Create a cache, spawning the cleanup task when enabled
    ///
    /// The cleanup task needs a Tokio runtime; outside one it is skipped and
    /// expired entries are still dropped lazily on access.
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(Self::DEFAULT_CAPACITY);
        let store: Store = Arc::new(Mutex::new(LruCache::new(capacity)));

        let shutdown_tx = if config.enable_background_cleanup {
            Self::spawn_cleanup(&store, config.cleanup_interval)
        } else {
            None
        };

        Self {
            store,
            ttl: config.ttl,
            shutdown_tx,
        }
    }

    fn spawn_cleanup(store: &Store, cleanup_interval: Duration) -> Option<mpsc::Sender<()>> {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("No Tokio runtime available, summary cache cleanup task not started");
            return None;
        };

        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let store = Arc::clone(store);

        handle.spawn(async move {
            let mut interval = tokio::time::interval(cleanup_interval);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let removed = purge(&mut lock(&store));
                        if removed > 0 {
                            tracing::debug!("Cleaned up {} expired summaries", removed);
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        tracing::debug!("Summary cache cleanup task received shutdown signal");
                        break;
                    }
                }
            }
        });

        Some(shutdown_tx)
    }

    /// Insert or overwrite the result for `user_id` and reset its expiry
    pub fn put(&self, user_id: &str, result: CachedResult) {
        let mut store = lock(&self.store);

        if !store.contains(user_id) && store.len() >= store.cap().get() {
            let removed = purge(&mut store);
            if removed > 0 {
                tracing::debug!(removed, "Dropped expired summaries to make room");
            }
        }

        if let Some((evicted, _)) = store.push(user_id.to_owned(), CacheEntry::new(result, self.ttl))
        {
            if evicted != user_id {
                tracing::debug!(user_id = %evicted, "Evicted least recently used summary");
            }
        }
    }

    /// Latest unexpired result for `user_id`
    #[must_use]
    pub fn get(&self, user_id: &str) -> Option<CachedResult> {
        let mut store = lock(&self.store);

        let expired = match store.get(user_id) {
            Some(entry) if !entry.is_expired() => return Some(entry.result.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            store.pop(user_id);
        }
        None
    }

    /// Number of unexpired entries
    #[must_use]
    pub fn len(&self) -> usize {
        let mut store = lock(&self.store);
        purge(&mut store);
        store.len()
    }

    /// Whether no unexpired entry exists
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        purge(&mut lock(&self.store))
    }

    /// Configured capacity
    #[must_use]
    pub fn capacity(&self) -> usize {
        lock(&self.store).cap().get()
    }

    /// Configured time-to-live
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

impl Drop for ResultCache {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            // A full buffer means a shutdown signal is already queued
            let _ = tx.try_send(());
        }
    }
}

fn lock(store: &Store) -> MutexGuard<'_, LruCache<String, CacheEntry>> {
    store.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("Summary cache lock poisoned, recovering");
        poisoned.into_inner()
    })
}

fn purge(store: &mut LruCache<String, CacheEntry>) -> usize {
    // Collect expired keys first (can't modify while iterating)
    let expired_keys: Vec<String> = store
        .iter()
        .filter(|(_, entry)| entry.is_expired())
        .map(|(key, _)| key.clone())
        .collect();

    for key in &expired_keys {
        store.pop(key);
    }
    expired_keys.len()
}
