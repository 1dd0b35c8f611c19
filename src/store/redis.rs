//! Redis-backed session store.

use async_trait::async_trait;
use ::redis::aio::MultiplexedConnection;
use ::redis::AsyncCommands;
use tracing::info;

use super::SessionStore;
use crate::auth::Session;
use crate::{GateError, Result};

const SESSION_PREFIX: &str = "session";

/// Session store backed by a Redis server.
///
/// Each session is one key, `session:<token>`, holding the user ID and
/// expiring together with the session.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: MultiplexedConnection,
}

impl RedisSessionStore {
    /// Connect to the Redis server at `url`.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = ::redis::Client::open(url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        info!("Connected to Redis session store");
        Ok(Self { conn })
    }

    fn make_key(token: &str) -> String {
        format!("{SESSION_PREFIX}:{token}")
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn add(&self, session: &Session) -> Result<()> {
        let ttl = session
            .remaining()
            .ok_or_else(|| GateError::Store("session already expired".to_string()))?;
        // EX takes whole seconds; round up so a sub-second remainder still lands.
        let secs = ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0);

        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(Self::make_key(&session.token), session.user_id, secs)
            .await?;
        Ok(())
    }

    async fn delete_by_token(&self, token: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(Self::make_key(token)).await?;
        Ok(())
    }

    async fn session_exists(&self, token: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        let exists: bool = conn.exists(Self::make_key(token)).await?;
        Ok(exists)
    }

    async fn user_id(&self, token: &str) -> Result<Option<i64>> {
        let mut conn = self.conn.clone();
        let user_id: Option<i64> = conn.get(Self::make_key(token)).await?;
        Ok(user_id)
    }
}
