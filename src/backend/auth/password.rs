/**
 * Password Hashing
 *
 * bcrypt at `DEFAULT_COST` takes long enough to stall an async worker, so
 * hashing and verification run on the blocking thread pool.
 */

use bcrypt::DEFAULT_COST;

use crate::backend::error::BackendError;

/// Hash `password` for storage
pub async fn hash_password(password: &str) -> Result<String, BackendError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, DEFAULT_COST))
        .await
        .map_err(|e| BackendError::state(format!("password hashing task failed: {}", e)))?
        .map_err(BackendError::from)
}

/// Check `password` against a stored bcrypt hash
pub async fn verify_password(password: &str, password_hash: &str) -> Result<bool, BackendError> {
    let password = password.to_owned();
    let password_hash = password_hash.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
        .await
        .map_err(|e| BackendError::state(format!("password verification task failed: {}", e)))?
        .map_err(BackendError::from)
}
