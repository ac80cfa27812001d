//! Argon2 credential hashing. Hashes are stored as PHC strings; there is no
//! default or derivable password.

use crate::errors::{AppError, AppResult};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let parsed =
        PasswordHash::new(stored_hash).map_err(|e| AppError::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
