//! Credential validation for SessionGate.
//!
//! Pure structural checks; nothing here touches a store.

use thiserror::Error;
use validator::ValidateEmail;

/// Maximum email length.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum password length in bytes.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Email is empty.
    #[error("email cannot be empty")]
    EmailEmpty,

    /// Email is too long.
    #[error("email must be at most {MAX_EMAIL_LENGTH} characters")]
    EmailTooLong,

    /// Email format is invalid.
    #[error("invalid email format")]
    EmailInvalidFormat,

    /// Password is empty.
    #[error("password cannot be empty")]
    PasswordEmpty,

    /// Password is too long.
    #[error("password must be at most {MAX_PASSWORD_LENGTH} bytes")]
    PasswordTooLong,
}

/// Transient login credentials. Never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Login email.
    pub email: String,
    /// Plaintext password bytes.
    pub password: Vec<u8>,
}

impl Credentials {
    /// Create credentials with the email trimmed of surrounding whitespace.
    pub fn new(email: &str, password: impl Into<Vec<u8>>) -> Self {
        Self {
            email: normalize_email(email),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Trim leading and trailing whitespace from an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_string()
}

/// Validate an email address.
///
/// # Examples
///
/// ```
/// use sessiongate::auth::validation::validate_email;
///
/// assert!(validate_email("user@example.com").is_ok());
/// assert!(validate_email("invalid").is_err());
/// assert!(validate_email("").is_err());
/// ```
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmailEmpty);
    }
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::EmailTooLong);
    }
    if !email.validate_email() {
        return Err(ValidationError::EmailInvalidFormat);
    }
    Ok(())
}

/// Validate a password.
///
/// Only emptiness and an upper bound are checked.
pub fn validate_password(password: &[u8]) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::PasswordEmpty);
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooLong);
    }
    Ok(())
}

/// Validate a credential pair.
pub fn validate_credentials(credentials: &Credentials) -> Result<(), ValidationError> {
    validate_email(&credentials.email)?;
    validate_password(&credentials.password)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_valid() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("user.name@example.co.jp").is_ok());
        assert!(validate_email("user+tag@example.com").is_ok());
    }

    #[test]
    fn test_validate_email_invalid_format() {
        for email in ["invalid", "@example.com", "user@", "user@@example.com", "a b@example.com"] {
            assert_eq!(
                validate_email(email),
                Err(ValidationError::EmailInvalidFormat),
                "{email}"
            );
        }
    }

    #[test]
    fn test_validate_email_empty() {
        assert_eq!(validate_email(""), Err(ValidationError::EmailEmpty));
    }

    #[test]
    fn test_validate_email_too_long() {
        let long_email = format!("{}@example.com", "a".repeat(250));
        assert_eq!(validate_email(&long_email), Err(ValidationError::EmailTooLong));
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password(b"x").is_ok());
        assert!(validate_password(&[b'a'; MAX_PASSWORD_LENGTH]).is_ok());
        assert_eq!(validate_password(b""), Err(ValidationError::PasswordEmpty));
        assert_eq!(
            validate_password(&[b'a'; MAX_PASSWORD_LENGTH + 1]),
            Err(ValidationError::PasswordTooLong)
        );
    }

    #[test]
    fn test_credentials_trims_email() {
        let creds = Credentials::new("  user@example.com\n", "secret");
        assert_eq!(creds.email, "user@example.com");
        assert!(validate_credentials(&creds).is_ok());
    }

    #[test]
    fn test_validate_credentials_failures() {
        assert_eq!(
            validate_credentials(&Credentials::new("", "secret")),
            Err(ValidationError::EmailEmpty)
        );
        assert_eq!(
            validate_credentials(&Credentials::new("user@example.com", "")),
            Err(ValidationError::PasswordEmpty)
        );
        assert_eq!(
            validate_credentials(&Credentials::new("not-an-email", "secret")),
            Err(ValidationError::EmailInvalidFormat)
        );
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("user@example.com", "hunter2");
        let debug = format!("{creds:?}");
        assert!(debug.contains("user@example.com"));
        assert!(!debug.contains("hunter2"));
    }
}
