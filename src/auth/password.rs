//! Password hashing with bcrypt.

use bcrypt::{hash, verify};
use serde_json::json;

use crate::error::AppError;

/// Hashes a password with the given bcrypt cost.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the cost is outside bcrypt's range.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost).map_err(|e| {
        AppError::internal("Failed to hash password", json!({ "reason": e.to_string() }))
    })
}

/// Runs [`hash_password`] on the blocking thread pool.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if hashing fails or the task is lost.
pub async fn hash_password_async(password: String, cost: u32) -> Result<String, AppError> {
    run_blocking(move || hash_password(&password, cost)).await?
}

/// Runs [`verify_password`] on the blocking thread pool.
pub async fn verify_password_async(password: String, password_hash: String) -> Result<bool, AppError> {
    run_blocking(move || verify_password(&password, &password_hash)).await
}

/// bcrypt takes hundreds of milliseconds at production cost and must not
/// run on an async worker thread.
async fn run_blocking<T, F>(task: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task).await.map_err(|e| {
        AppError::internal("Password task failed", json!({ "reason": e.to_string() }))
    })
}

/// Verifies a password against a stored bcrypt hash.
///
/// A malformed hash is treated as a mismatch.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match verify(password, password_hash) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::warn!(error = %e, "stored password hash could not be parsed");
            false
        }
    }
}
