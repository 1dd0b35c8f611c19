//! Authentication module for SessionGate.
//!
//! This module provides credential validation, password hashing, session
//! tokens, CSRF tokens and the auth orchestrator tying them to the user
//! directory and session store.

pub mod csrf;
mod password;
mod service;
mod session;
pub mod validation;

pub use csrf::{CsrfError, CsrfTokens, CSRF_HEADER};
pub use password::{
    hash_password, hash_password_async, verify_dummy, verify_dummy_async, verify_password,
    verify_password_async, PasswordError,
};
pub use service::{AuthPolicy, AuthService, Registration, DEFAULT_CALL_TIMEOUT};
pub use session::{
    generate_token, looks_like_token, Session, DEFAULT_SESSION_DURATION_SECS, TOKEN_BYTES,
};
pub use validation::{Credentials, ValidationError};
