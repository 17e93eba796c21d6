// schemagate-core/src/infrastructure/adapters/lru_store.rs

use async_trait::async_trait;
use lru::LruCache;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use crate::domain::config::{DEFAULT_DOCUMENT_STORE_SIZE, DocumentStoreConfig};
use crate::domain::document::{CacheOptions, ParsedDocument};
use crate::domain::error::DomainError;
use crate::ports::document_store::DocumentStore;

struct Entry {
    value: Arc<ParsedDocument>,
    size: usize,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }
}

struct Inner {
    entries: LruCache<String, Entry>,
    total_size: usize,
}

impl Inner {
    fn remove(&mut self, key: &str) -> Option<Entry> {
        let entry = self.entries.pop(key)?;
        self.total_size -= entry.size;
        Some(entry)
    }

    fn purge_expired(&mut self, now: Instant) {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();
        for key in expired {
            self.remove(&key);
        }
    }

    fn evict_down_to(&mut self, max_size: usize) {
        while self.total_size > max_size {
            match self.entries.pop_lru() {
                Some((key, entry)) => {
                    self.total_size -= entry.size;
                    debug!(key.len = key.len(), size = entry.size, "Evicted document");
                }
                None => break,
            }
        }
    }
}

/// In-process document store bounded by total approximate size.
///
/// Least-recently-used entries go first once the bound is exceeded; expired
/// entries are dropped before anything live is evicted. A document larger than
/// the whole bound is never retained.
pub struct LruDocumentStore {
    inner: Mutex<Inner>,
    max_size: usize,
    default_ttl: Option<Duration>,
}

impl LruDocumentStore {
    pub fn new(max_size: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: LruCache::unbounded(),
                total_size: 0,
            }),
            max_size,
            default_ttl: None,
        }
    }

    /// TTL applied when `set` is called without one.
    pub fn with_default_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.default_ttl = ttl;
        self
    }

    pub fn from_config(config: &DocumentStoreConfig) -> Self {
        Self::new(config.max_size).with_default_ttl(config.ttl())
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Live entries only.
    pub fn len(&self) -> usize {
        let mut inner = self.lock();
        inner.purge_expired(Instant::now());
        inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for LruDocumentStore {
    fn default() -> Self {
        Self::new(DEFAULT_DOCUMENT_STORE_SIZE)
    }
}

#[async_trait]
impl DocumentStore for LruDocumentStore {
    async fn get(&self, key: &str) -> Result<Option<Arc<ParsedDocument>>, DomainError> {
        let now = Instant::now();
        let mut inner = self.lock();

        let expired = match inner.entries.peek(key) {
            None => return Ok(None),
            Some(entry) => entry.is_expired(now),
        };
        if expired {
            inner.remove(key);
            return Ok(None);
        }

        // `get` (not `peek`) marks the entry as most recently used.
        Ok(inner.entries.get(key).map(|entry| Arc::clone(&entry.value)))
    }

    async fn set(
        &self,
        key: &str,
        value: Arc<ParsedDocument>,
        options: CacheOptions,
    ) -> Result<(), DomainError> {
        let now = Instant::now();
        let size = value.approximate_size();
        let mut inner = self.lock();

        if size > self.max_size {
            // The previous value is stale now: drop it rather than serve it.
            inner.remove(key);
            debug!(size, max = self.max_size, "Document larger than store, not cached");
            return Ok(());
        }

        // A deadline past the clock's range never expires.
        let expires_at = options
            .ttl
            .or(self.default_ttl)
            .and_then(|ttl| now.checked_add(ttl));
        let entry = Entry {
            value,
            size,
            expires_at,
        };
        if let Some(previous) = inner.entries.put(key.to_string(), entry) {
            inner.total_size -= previous.size;
        }
        inner.total_size += size;

        if inner.total_size > self.max_size {
            inner.purge_expired(now);
            inner.evict_down_to(self.max_size);
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        self.lock().remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.total_size = 0;
        Ok(())
    }

    fn total_size(&self) -> usize {
        let mut inner = self.lock();
        inner.purge_expired(Instant::now());
        inner.total_size
    }
}
