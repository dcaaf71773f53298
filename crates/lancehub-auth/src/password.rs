// Password hashing on the blocking pool.

use crate::error::{AuthError, AuthResult};
use bcrypt::{hash, verify};

/// Bcrypt cost factor for password hashing.
pub const BCRYPT_COST: u32 = 10;

/// Hash a password using bcrypt.
///
/// Runs on the blocking thread pool since bcrypt is CPU-bound.
///
/// # Errors
/// Returns `AuthError::HashingError` if bcrypt fails.
pub async fn hash_password(password: &str, cost: Option<u32>) -> AuthResult<String> {
    let password = password.to_string();
    let cost = cost.unwrap_or(BCRYPT_COST);

    tokio::task::spawn_blocking(move || {
        hash(password, cost).map_err(|e| AuthError::HashingError(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::HashingError(format!("Task join error: {}", e)))?
}

/// Verify a password against a bcrypt hash.
///
/// # Returns
/// `Ok(true)` if the password matches, `Ok(false)` if not.
pub async fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    let password = password.to_string();
    let hash = hash.to_string();

    tokio::task::spawn_blocking(move || {
        verify(password, &hash).map_err(|e| AuthError::HashingError(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::HashingError(format!("Task join error: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_and_verify_round_trip() {
        let password = "correct horse battery staple";
        // Low cost keeps the test fast.
        let hash = hash_password(password, Some(4)).await.expect("hash failed");
        assert!(hash.starts_with("$2b$"));

        assert!(verify_password(password, &hash).await.expect("verify failed"));
        assert!(!verify_password("wrong password", &hash).await.expect("verify failed"));
    }

    #[tokio::test]
    async fn verify_against_garbage_hash_errors() {
        let result = verify_password("anything", "not-a-bcrypt-hash").await;
        assert!(matches!(result, Err(AuthError::HashingError(_))));
    }
}
