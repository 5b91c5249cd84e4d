use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Result;

// =============================================================================
// Password Hashing
// =============================================================================

/// Hash a password with Argon2 and a fresh random salt
///
/// The output is a PHC-format string carrying the algorithm parameters and
/// salt, so verification needs nothing beyond the stored hash itself.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC-format hash
///
/// Argon2 verification is constant-time with respect to the candidate
/// password. A malformed stored hash fails verification rather than erroring.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => {
            tracing::warn!("Stored password hash is malformed");
            false
        }
    }
}

// =============================================================================
// Session Tokens
// =============================================================================

static TOKEN_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Derive an opaque session token
///
/// `token = SHA256(secret || user_id || clock || counter)`
///
/// The server-side secret makes tokens unguessable; the nanosecond clock and
/// a process-wide counter make them unique across mints, including repeated
/// logins by the same user within one tick.
pub fn mint_session_token(secret: &str, user_id: i64) -> String {
    let counter = TOKEN_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();

    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(user_id.to_be_bytes());
    hasher.update(nanos.to_be_bytes());
    hasher.update(counter.to_be_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verify_roundtrip() {
        let hash = hash_password("pw123").unwrap();
        assert!(verify_password("pw123", &hash));
        assert!(!verify_password("pw124", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same-password").unwrap();
        let b = hash_password("same-password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_fails_verification() {
        assert!(!verify_password("pw123", "not-a-phc-string"));
        assert!(!verify_password("pw123", ""));
    }

    #[test]
    fn test_tokens_are_unique_hex() {
        let t1 = mint_session_token("secret", 1);
        let t2 = mint_session_token("secret", 1);
        assert_ne!(t1, t2);
        assert_eq!(t1.len(), 64);
        assert!(t1.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
