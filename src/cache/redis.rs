//! Redis cache implementation using bb8 connection pool.
//!
//! Own entries live under `{key_prefix}:{cache_name}:`. Shared keys, such as
//! the registration code written by the image-code service, are used as-is.

use std::time::Duration;

use async_trait::async_trait;
use bb8::{Pool, PooledConnection};
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, RedisError};

use crate::cache::{AppCache, CacheError};
use crate::config::settings::RedisCacheConfig;

type RedisPool = Pool<Client>;

fn operation(e: RedisError) -> CacheError {
    CacheError::Operation(e.to_string())
}

fn namespaced(prefix: &str, key: &str) -> String {
    format!("{}:{}", prefix, key)
}

/// Redis-based cache with bb8 connection pool.
pub struct RedisCache {
    pool: RedisPool,
    key_prefix: String,
    default_ttl: u64,
}

impl RedisCache {
    pub async fn new(config: &RedisCacheConfig, cache_name: &str) -> Result<Self, CacheError> {
        let client =
            Client::open(config.url.as_str()).map_err(|e| CacheError::Connection(e.to_string()))?;

        let pool = Pool::builder()
            .max_size(config.pool_size)
            .connection_timeout(Duration::from_secs(config.connection_timeout))
            .build(client)
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        Ok(Self {
            pool,
            key_prefix: namespaced(&config.key_prefix, cache_name),
            default_ttl: config.ttl_seconds,
        })
    }

    async fn conn(&self) -> Result<PooledConnection<'_, Client>, CacheError> {
        self.pool
            .get()
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))
    }

    async fn get_raw(&self, key: String) -> Result<Option<Vec<u8>>, CacheError> {
        let mut conn = self.conn().await?;
        let conn: &mut MultiplexedConnection = &mut conn;
        conn.get(key).await.map_err(operation)
    }

    async fn set_raw(
        &self,
        key: String,
        value: Vec<u8>,
        ttl_seconds: Option<u64>,
    ) -> Result<(), CacheError> {
        let mut conn = self.conn().await?;
        let conn: &mut MultiplexedConnection = &mut conn;
        conn.set_ex::<_, _, ()>(key, value, ttl_seconds.unwrap_or(self.default_ttl))
            .await
            .map_err(operation)
    }
}

#[async_trait]
impl AppCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.get_raw(namespaced(&self.key_prefix, key)).await
    }

    async fn set(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl_seconds: Option<u64>,
    ) -> Result<(), CacheError> {
        self.set_raw(namespaced(&self.key_prefix, key), value, ttl_seconds)
            .await
    }

    async fn get_shared(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.get_raw(key.to_string()).await
    }

    async fn set_shared(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl_seconds: Option<u64>,
    ) -> Result<(), CacheError> {
        self.set_raw(key.to_string(), value, ttl_seconds).await
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.conn().await?;
        let conn: &mut MultiplexedConnection = &mut conn;
        conn.del::<_, ()>(namespaced(&self.key_prefix, key))
            .await
            .map_err(operation)
    }

    async fn clear(&self) -> Result<(), CacheError> {
        let mut conn = self.conn().await?;
        let conn: &mut MultiplexedConnection = &mut conn;

        let keys: Vec<String> = redis::cmd("KEYS")
            .arg(namespaced(&self.key_prefix, "*"))
            .query_async(conn)
            .await
            .map_err(operation)?;

        if !keys.is_empty() {
            conn.del::<_, ()>(keys).await.map_err(operation)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaced_keys() {
        let prefix = namespaced("novel", "session");
        assert_eq!(prefix, "novel:session");
        assert_eq!(
            namespaced(&prefix, "RANDOMVALIDATECODEKEY"),
            "novel:session:RANDOMVALIDATECODEKEY"
        );
    }

    #[tokio::test]
    async fn test_invalid_url_is_connection_error() {
        let config = RedisCacheConfig {
            url: "not a url".to_string(),
            ..Default::default()
        };
        let result = RedisCache::new(&config, "session").await;
        assert!(matches!(result, Err(CacheError::Connection(_))));
    }
}
