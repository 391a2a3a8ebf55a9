//! AppCache trait definition.

use async_trait::async_trait;

use crate::cache::CacheError;

/// Byte-oriented key-value cache shared by every backend.
#[async_trait]
pub trait AppCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store a value. `ttl_seconds` overrides the backend default when set.
    async fn set(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl_seconds: Option<u64>,
    ) -> Result<(), CacheError>;

    async fn remove(&self, key: &str) -> Result<(), CacheError>;

    /// Read a key outside this cache's namespace, as written by other services.
    async fn get_shared(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.get(key).await
    }

    async fn set_shared(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl_seconds: Option<u64>,
    ) -> Result<(), CacheError> {
        self.set(key, value, ttl_seconds).await
    }

    async fn clear(&self) -> Result<(), CacheError>;
}
