//! Memory cache implementation using cached::TimedSizedCache.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use cached::{Cached, TimedSizedCache};

use crate::cache::{AppCache, CacheError};
use crate::config::settings::MemoryCacheConfig;

/// Value plus an optional deadline tighter than the cache-wide lifespan
#[derive(Clone)]
struct Entry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

/// In-memory cache with size limit and TTL.
pub struct MemoryCache {
    store: Mutex<TimedSizedCache<String, Entry>>,
}

impl MemoryCache {
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let store = TimedSizedCache::with_size_and_lifespan(
            config.max_size,
            Duration::from_secs(config.ttl_seconds),
        );
        Self {
            store: Mutex::new(store),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, TimedSizedCache<String, Entry>>, CacheError> {
        self.store
            .lock()
            .map_err(|e| CacheError::Operation(e.to_string()))
    }
}

#[async_trait]
impl AppCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut store = self.lock()?;
        match store.cache_get(key) {
            None => return Ok(None),
            Some(entry) if entry.expires_at.is_none_or(|d| d > Instant::now()) => {
                return Ok(Some(entry.value.clone()));
            }
            Some(_) => {}
        }
        store.cache_remove(key);
        Ok(None)
    }

    async fn set(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl_seconds: Option<u64>,
    ) -> Result<(), CacheError> {
        let entry = Entry {
            value,
            expires_at: ttl_seconds.map(|ttl| Instant::now() + Duration::from_secs(ttl)),
        };
        self.lock()?.cache_set(key.to_string(), entry);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.lock()?.cache_remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        self.lock()?.cache_clear();
        Ok(())
    }
}
