//! User directory for SessionGate.

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::user::{NewUser, User};
use crate::{GateError, Result};

/// Persistent user storage as seen by the auth orchestrator.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Look up a user by email (exact match).
    async fn get_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Insert a user and return the assigned ID.
    ///
    /// Returns `GateError::Conflict` if the email is already registered.
    async fn add_user(&self, user: &NewUser) -> Result<i64>;

    /// Whether a user with this email exists.
    async fn user_exists(&self, email: &str) -> Result<bool>;
}

/// User directory backed by the SQLite `users` table.
#[derive(Clone)]
pub struct SqliteUserDirectory {
    pool: SqlitePool,
}

impl SqliteUserDirectory {
    /// Create a directory over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for SqliteUserDirectory {
    async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password, image_path, created_at
             FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn add_user(&self, user: &NewUser) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO users (name, email, password, image_path) VALUES (?, ?, ?, ?)",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.image_path)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                GateError::Conflict("user".to_string())
            }
            other => GateError::from(other),
        })?;

        Ok(result.last_insert_rowid())
    }

    async fn user_exists(&self, email: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}
