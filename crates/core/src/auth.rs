//! # Password hashing
//!
//! Account passwords are stored as Argon2 PHC strings. The PHC format embeds the
//! algorithm, version, parameters and salt, so verification needs nothing but the
//! stored string.

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use eyre::{Result, eyre};
use rand::rngs::OsRng;

/// Hashes a password with a fresh random salt and the default Argon2id parameters.
///
/// # Example
///
/// ```rust
/// let hashed = labsched_core::auth::hash_password("rahasia123")?;
/// assert!(hashed.starts_with("$argon2"));
/// # Ok::<(), eyre::Report>(())
/// ```
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Checks `password` against a stored PHC string.
///
/// A mismatch is `Ok(false)`. Only a malformed stored hash is an error.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash =
        PasswordHash::new(password_hash).map_err(|e| eyre!("Invalid password hash: {}", e))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
