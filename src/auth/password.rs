//! Password hashing for SessionGate.
//!
//! Uses Argon2id. Hashing is CPU- and memory-heavy, so the async wrappers
//! move the work onto the blocking thread pool.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params,
};
use rand_core::OsRng;
use std::sync::OnceLock;
use thiserror::Error;

/// Password-related errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    HashError(String),

    /// Password hash is invalid.
    #[error("invalid password hash format")]
    InvalidHash,

    /// Password verification failed (wrong password).
    #[error("password verification failed")]
    VerificationFailed,
}

/// Create the Argon2 hasher.
///
/// Parameters:
/// - Memory cost: 64 MB (65536 KiB)
/// - Time cost: 3 iterations
/// - Parallelism: 4 lanes
fn create_argon2() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(65536, 3, 4, None)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;
    Ok(Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params,
    ))
}

/// Hash a password using Argon2id.
///
/// Returns a PHC-formatted hash string that includes the salt and parameters.
///
/// # Examples
///
/// ```
/// use sessiongate::auth::hash_password;
///
/// let hash = hash_password(b"my_secure_password").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &[u8]) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = create_argon2()?
        .hash_password(password, &salt)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored hash.
///
/// The parameters are taken from the PHC string, not from `create_argon2()`.
pub fn verify_password(password: &[u8], hash: &str) -> Result<(), PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHash)?;

    Argon2::default()
        .verify_password(password, &parsed_hash)
        .map_err(|_| PasswordError::VerificationFailed)
}

fn dummy_hash() -> Result<&'static str, PasswordError> {
    static DUMMY_HASH: OnceLock<String> = OnceLock::new();
    if let Some(hash) = DUMMY_HASH.get() {
        return Ok(hash);
    }
    let hash = hash_password(b"sessiongate-absent-user")?;
    Ok(DUMMY_HASH.get_or_init(|| hash))
}

/// Run a full verification against a fixed hash and discard the outcome.
///
/// Called when there is no stored hash to check, so an unknown account
/// costs the same as a wrong password.
pub fn verify_dummy(password: &[u8]) -> Result<(), PasswordError> {
    match verify_password(password, dummy_hash()?) {
        Ok(()) | Err(PasswordError::VerificationFailed) => Ok(()),
        Err(e) => Err(e),
    }
}

/// Hash a password on the blocking thread pool.
pub async fn hash_password_async(password: Vec<u8>) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| PasswordError::HashError(e.to_string()))?
}

/// Verify a password on the blocking thread pool.
pub async fn verify_password_async(password: Vec<u8>, hash: String) -> Result<(), PasswordError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| PasswordError::HashError(e.to_string()))?
}

/// [`verify_dummy`] on the blocking thread pool.
pub async fn verify_dummy_async(password: Vec<u8>) -> Result<(), PasswordError> {
    tokio::task::spawn_blocking(move || verify_dummy(&password))
        .await
        .map_err(|e| PasswordError::HashError(e.to_string()))?
}
