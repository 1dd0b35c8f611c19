//! SessionGate - session-based authentication gate
//!
//! Credential login, opaque session tokens backed by a key-value store,
//! stateless CSRF tokens and an ordered request authorization pipeline for
//! an HTTP API.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod store;
pub mod web;

pub use auth::{
    hash_password, verify_password, AuthPolicy, AuthService, Credentials, CsrfError, CsrfTokens,
    PasswordError, Registration, Session, ValidationError,
};
pub use config::Config;
pub use db::{Database, NewUser, SqliteUserDirectory, User, UserDirectory};
pub use error::{GateError, Result};
pub use store::{MemorySessionStore, RedisSessionStore, SessionStore};
pub use web::{create_router, AppState, WebServer};
