use crate::error::AppError;
use bcrypt::{hash, verify};
use lazy_static::lazy_static;

pub const PASSWORD_COST: u32 = 12;

lazy_static! {
    /// Hash checked when no account matches, so unknown usernames cost as much as wrong passwords.
    static ref DUMMY_HASH: Option<String> = hash("not-a-real-password", PASSWORD_COST).ok();
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash_password_with_cost(password, PASSWORD_COST)
}

/// Hashes with an explicit bcrypt cost; lower costs are only meant for tests.
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {}", e)))
}

/// Runs a full bcrypt verification that never succeeds.
pub fn verify_unknown_user(password: &str) -> bool {
    if let Some(dummy) = DUMMY_HASH.as_deref() {
        let _ = verify(password, dummy);
    }
    false
}
