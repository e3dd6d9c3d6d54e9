use crate::error::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};

/// Hashes a password with bcrypt. The digest carries its own salt and cost.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST).map_err(|e| {
        log::error!("failed to hash password: {}", e);
        AppError::InternalServerError("could not hash password".into())
    })
}

/// Checks `password` against a stored digest.
///
/// A mismatch is `false`, never an error. A digest that is not a valid bcrypt
/// string is also treated as a mismatch.
pub fn verify_password(password: &str, hashed_password: &str) -> bool {
    verify(password, hashed_password).unwrap_or_else(|e| {
        log::warn!("stored password hash could not be checked: {}", e);
        false
    })
}
