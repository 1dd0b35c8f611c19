//! Session store for SessionGate.
//!
//! A session store is a key-value service with per-key expiry. The store's
//! TTL is authoritative: once an entry has expired it no longer exists.

mod memory;
mod redis;

use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::Session;
use crate::config::{SessionBackend, SessionStoreConfig};
use crate::{GateError, Result};

pub use self::memory::MemorySessionStore;
pub use self::redis::RedisSessionStore;

/// Key-value contract for live sessions.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Store a session. Its TTL is the time left until `session.expires_at`.
    async fn add(&self, session: &Session) -> Result<()>;

    /// Remove a session. A missing key is not an error.
    async fn delete_by_token(&self, token: &str) -> Result<()>;

    /// Whether a live session exists for the token.
    async fn session_exists(&self, token: &str) -> Result<bool>;

    /// User bound to the token, if the session is live.
    async fn user_id(&self, token: &str) -> Result<Option<i64>>;
}

/// Open the session store selected by configuration.
pub async fn open(config: &SessionStoreConfig) -> Result<Arc<dyn SessionStore>> {
    match config.backend {
        SessionBackend::Memory => Ok(Arc::new(MemorySessionStore::new())),
        SessionBackend::Redis => {
            if config.url.is_empty() {
                return Err(GateError::Config(
                    "session_store.url is required for the redis backend".to_string(),
                ));
            }
            Ok(Arc::new(RedisSessionStore::connect(&config.url).await?))
        }
    }
}
