//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use crate::cache::{AppCache, VerifyCodeStore};
use crate::config::JwtConfig;
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;
use crate::utils::JwtTokenService;

/// Application state containing all shared services and resources.
///
/// Cloning is cheap: services are behind `Arc`, the token service holds
/// only key material, and the code store shares one cache backend.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Issues and decodes session tokens
    pub tokens: JwtTokenService,
    /// Registration verification codes
    pub verify_codes: VerifyCodeStore,
}

impl AppState {
    pub fn new(services: Services, tokens: JwtTokenService, verify_codes: VerifyCodeStore) -> Self {
        Self {
            services,
            tokens,
            verify_codes,
        }
    }

    /// Builds the PostgreSQL-backed state.
    ///
    /// # Example
    /// ```ignore
    /// let pool = establish_async_connection_pool(&settings.database).await?;
    /// let cache = CacheManager::new(settings.cache.clone(), "session").await?;
    /// let state = AppState::from_pool(pool, &settings.jwt, cache.backend());
    /// ```
    pub fn from_pool(pool: AsyncDbPool, jwt_config: &JwtConfig, cache: Arc<dyn AppCache>) -> Self {
        let services = Services::new(Repositories::new(pool));
        Self::new(
            services,
            JwtTokenService::new(jwt_config),
            VerifyCodeStore::new(cache),
        )
    }
}
