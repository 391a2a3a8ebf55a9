//! Cache manager that dispatches to the configured backend.

use std::sync::Arc;

use tracing::info;

use crate::cache::memory::MemoryCache;
use crate::cache::redis::RedisCache;
use crate::cache::{AppCache, CacheError};
use crate::config::settings::{CacheBackend, CacheConfig};

/// Owns the configured cache backend and hands out shared references to it.
#[derive(Clone)]
pub struct CacheManager {
    backend: Arc<dyn AppCache>,
    config: CacheConfig,
}

impl CacheManager {
    /// Build the backend selected by `config.backend`.
    ///
    /// Redis keys are namespaced as `{key_prefix}:{cache_name}:{key}`.
    pub async fn new(config: CacheConfig, cache_name: &str) -> Result<Self, CacheError> {
        let backend: Arc<dyn AppCache> = match config.backend {
            CacheBackend::Memory => Arc::new(MemoryCache::new(&config.memory)),
            CacheBackend::Redis => Arc::new(RedisCache::new(&config.redis, cache_name).await?),
        };
        info!(backend = ?config.backend, cache_name, "Cache backend ready");

        Ok(Self { backend, config })
    }

    /// Wrap an existing backend, used by tests and embedders.
    pub fn with_backend(backend: Arc<dyn AppCache>, config: CacheConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> Arc<dyn AppCache> {
        Arc::clone(&self.backend)
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }
}
