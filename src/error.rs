//! Error types for SessionGate.

use thiserror::Error;

/// Common error type for SessionGate.
///
/// The variants mirror the error taxonomy exposed at the HTTP boundary;
/// `Store`, `Database`, `Timeout` and `Internal` all surface as an internal
/// server error there.
#[derive(Error, Debug)]
pub enum GateError {
    /// Malformed input or request body.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Login failed: unknown email, wrong password or malformed credentials.
    ///
    /// Deliberately carries no detail so callers cannot tell which one.
    #[error("wrong credentials")]
    WrongCredentials,

    /// Missing, expired or unknown session.
    #[error("unauthorized")]
    Unauthorized,

    /// CSRF failure or an action not allowed in the current auth state.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Resource already exists.
    #[error("{0} already exists")]
    Conflict(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Session store failure.
    #[error("session store error: {0}")]
    Store(String),

    /// User directory failure.
    #[error("database error: {0}")]
    Database(String),

    /// A collaborator call exceeded its deadline.
    #[error("{0} timed out")]
    Timeout(String),

    /// Unexpected failure.
    #[error("internal error: {0}")]
    Internal(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl GateError {
    /// Whether this error is reported to clients as an internal server error.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            GateError::Store(_)
                | GateError::Database(_)
                | GateError::Timeout(_)
                | GateError::Internal(_)
                | GateError::Io(_)
                | GateError::Config(_)
        )
    }
}

impl From<sqlx::Error> for GateError {
    fn from(e: sqlx::Error) -> Self {
        GateError::Database(e.to_string())
    }
}

impl From<redis::RedisError> for GateError {
    fn from(e: redis::RedisError) -> Self {
        GateError::Store(e.to_string())
    }
}

/// Result type alias for SessionGate operations.
pub type Result<T> = std::result::Result<T, GateError>;
