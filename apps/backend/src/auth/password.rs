//! Password hashing and the verified-identity boundary.
//!
//! Hashes are Argon2id PHC strings. `verify_password` is the only place a
//! `VerifiedIdentity` is created outside of unit tests.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tracing::warn;

use crate::auth::claims::{Role, VerifiedIdentity};
use crate::AppError;

/// Hash a password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}

/// Check `presented` against the account's stored hash.
///
/// Returns the verified identity for the account on a match and `None`
/// otherwise. An unparseable stored hash never matches.
pub fn verify_password(
    presented: &str,
    stored_hash: &str,
    subject_id: &str,
    role: Role,
) -> Option<VerifiedIdentity> {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(subject_id, error = %e, "Stored password hash is unparseable");
            return None;
        }
    };

    Argon2::default()
        .verify_password(presented.as_bytes(), &parsed)
        .ok()
        .map(|_| VerifiedIdentity::new(subject_id, role))
}
