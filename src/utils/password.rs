use argon2::{
    Argon2,
    password_hash::{PasswordHasher, PasswordVerifier, phc::PasswordHash},
};

use crate::error::{AppError, AppResult};

/// Hash a password using Argon2id with a random salt
pub fn hash_password(password: &str) -> AppResult<String> {
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes())
        .map_err(|e| AppError::Internal {
            source: anyhow::anyhow!("Failed to hash password: {}", e),
        })?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against a stored PHC hash.
///
/// A stored value that is not a valid PHC string never verifies.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(password_hash) else {
        tracing::warn!("Stored password hash is not a valid PHC string");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password() {
        let hash = hash_password("test_password_123").expect("Failed to hash password");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_verify_password() {
        let hash = hash_password("test_password_123").expect("Failed to hash password");
        assert!(verify_password("test_password_123", &hash));
        assert!(!verify_password("wrong_password", &hash));
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let hash1 = hash_password("secret").unwrap();
        let hash2 = hash_password("secret").unwrap();
        assert_ne!(hash1, hash2);
        assert!(verify_password("secret", &hash1));
        assert!(verify_password("secret", &hash2));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!verify_password("secret", "e10adc3949ba59abbe56e057f20f883e"));
        assert!(!verify_password("", ""));
    }
}
