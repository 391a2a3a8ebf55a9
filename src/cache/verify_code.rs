//! Registration verification codes kept in the shared cache.

use std::sync::Arc;

use tracing::debug;

use crate::cache::{AppCache, CacheError};

/// Key the image-code service writes the current code under, outside any
/// cache namespace.
pub const VERIFY_CODE_KEY: &str = "RANDOMVALIDATECODEKEY";

/// Reads the single verification code slot.
#[derive(Clone)]
pub struct VerifyCodeStore {
    cache: Arc<dyn AppCache>,
}

impl VerifyCodeStore {
    pub fn new(cache: Arc<dyn AppCache>) -> Self {
        Self { cache }
    }

    /// The code currently stored, if any.
    pub async fn current(&self) -> Result<Option<String>, CacheError> {
        match self.cache.get_shared(VERIFY_CODE_KEY).await? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| CacheError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }

    /// True only when a code is stored and equals `candidate` exactly.
    pub async fn matches(&self, candidate: &str) -> Result<bool, CacheError> {
        let matched = self
            .current()
            .await?
            .is_some_and(|code| code == candidate);
        debug!(matched, "Verification code checked");
        Ok(matched)
    }
}

impl std::fmt::Debug for VerifyCodeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerifyCodeStore").finish_non_exhaustive()
    }
}
