//! Password hashing with bcrypt.
//!
//! Hashes carry their own salt, so equality of plaintexts never produces
//! equal hashes and verification needs no extra state.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::AppError;

/// Hash a plaintext password for storage.
pub fn hash_password(plain: &str) -> Result<String, AppError> {
    hash(plain, DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

/// Check a plaintext password against a stored hash.
///
/// Returns Ok(false) on mismatch; Err only for malformed hashes.
pub fn verify_password(plain: &str, password_hash: &str) -> Result<bool, AppError> {
    verify(plain, password_hash)
        .map_err(|e| AppError::internal(format!("Failed to verify password: {e}")))
}
