//! In-process session store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::info;

use super::SessionStore;
use crate::auth::Session;
use crate::Result;

#[derive(Debug, Clone, Copy)]
struct Entry {
    user_id: i64,
    expires_at: DateTime<Utc>,
}

impl Entry {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Session store backed by a map in process memory.
///
/// Expired entries are treated as absent on read and removed lazily, either
/// when read or on the next insert; there is no background sweeper.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        info!("Creating in-memory session store");
        Self::default()
    }

    /// Number of entries held, including expired ones not yet evicted.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    async fn lookup(&self, token: &str) -> Option<i64> {
        let now = Utc::now();
        let entry = self.entries.read().await.get(token).copied()?;
        if entry.is_live(now) {
            return Some(entry.user_id);
        }

        let mut entries = self.entries.write().await;
        if entries.get(token).is_some_and(|e| !e.is_live(now)) {
            entries.remove(token);
        }
        None
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn add(&self, session: &Session) -> Result<()> {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, e| e.is_live(now));
        entries.insert(
            session.token.clone(),
            Entry {
                user_id: session.user_id,
                expires_at: session.expires_at,
            },
        );
        Ok(())
    }

    async fn delete_by_token(&self, token: &str) -> Result<()> {
        self.entries.write().await.remove(token);
        Ok(())
    }

    async fn session_exists(&self, token: &str) -> Result<bool> {
        Ok(self.lookup(token).await.is_some())
    }

    async fn user_id(&self, token: &str) -> Result<Option<i64>> {
        Ok(self.lookup(token).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_add_and_lookup() {
        let store = MemorySessionStore::new();
        let session = Session::new(7, Duration::from_secs(60));

        store.add(&session).await.unwrap();

        assert!(store.session_exists(&session.token).await.unwrap());
        assert_eq!(store.user_id(&session.token).await.unwrap(), Some(7));
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let store = MemorySessionStore::new();

        assert!(!store.session_exists("missing").await.unwrap());
        assert_eq!(store.user_id("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemorySessionStore::new();
        let session = Session::new(1, Duration::from_secs(60));
        store.add(&session).await.unwrap();

        store.delete_by_token(&session.token).await.unwrap();
        store.delete_by_token(&session.token).await.unwrap();
        store.delete_by_token("never-existed").await.unwrap();

        assert!(!store.session_exists(&session.token).await.unwrap());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_expired_entry_is_absent_and_evicted() {
        let store = MemorySessionStore::new();
        let past = Utc::now() - chrono::Duration::seconds(120);
        let session = Session::new_at(3, Duration::from_secs(60), past);
        store.add(&session).await.unwrap();
        assert_eq!(store.len().await, 1);

        assert!(!store.session_exists(&session.token).await.unwrap());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_add_prunes_expired_entries() {
        let store = MemorySessionStore::new();
        let past = Utc::now() - chrono::Duration::seconds(120);
        for _ in 0..1000 {
            let abandoned = Session::new_at(9, Duration::from_secs(60), past);
            store.add(&abandoned).await.unwrap();
        }

        let live = Session::new(9, Duration::from_secs(60));
        store.add(&live).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert!(store.session_exists(&live.token).await.unwrap());
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let store = MemorySessionStore::new();
        let a = Session::new(1, Duration::from_secs(60));
        let b = Session::new(1, Duration::from_secs(60));
        store.add(&a).await.unwrap();
        store.add(&b).await.unwrap();

        store.delete_by_token(&a.token).await.unwrap();

        assert!(!store.session_exists(&a.token).await.unwrap());
        assert!(store.session_exists(&b.token).await.unwrap());
    }
}
