//! Argon2id password hashing and verification.
//!
//! Hashes use the PHC string format, so the algorithm parameters and the
//! per-call random salt travel inside the digest itself.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use crate::error::BlogError;

/// Hash a plaintext password with a fresh random salt.
pub fn hash(plaintext: &str) -> Result<String, BlogError> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = Argon2::default().hash_password(plaintext.as_bytes(), &salt)?;
    Ok(digest.to_string())
}

/// Verify a plaintext password against a stored PHC digest.
///
/// Any failure, including a digest that does not parse, reads as a
/// mismatch.
pub fn verify(plaintext: &str, digest: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(digest) else {
        return false;
    };
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}
