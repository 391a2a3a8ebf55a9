//! Cache module with runtime-selected backends.
//!
//! - Memory cache (in-process, single instance only)
//! - Redis cache (shared between instances)
//!
//! # Configuration
//!
//! ```toml
//! [cache]
//! backend = "memory"  # or "redis"
//!
//! [cache.memory]
//! max_size = 1000
//! ttl_seconds = 300
//!
//! [cache.redis]
//! url = "redis://127.0.0.1:6379"
//! ttl_seconds = 300
//! pool_size = 4
//! connection_timeout = 5
//! key_prefix = "novel"
//! ```

mod error;
mod manager;
mod memory;
mod redis;
mod traits;
mod verify_code;

pub use error::CacheError;
pub use manager::CacheManager;
pub use memory::MemoryCache;
pub use traits::AppCache;
pub use verify_code::{VERIFY_CODE_KEY, VerifyCodeStore};
