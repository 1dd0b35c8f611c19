//! Session tokens for SessionGate.

use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use rand_core::{OsRng, RngCore};

/// Default session lifetime (24 hours).
pub const DEFAULT_SESSION_DURATION_SECS: u64 = 24 * 60 * 60;

/// Number of random bytes in a session token.
pub const TOKEN_BYTES: usize = 32;

/// Longest token string accepted before any store lookup.
pub const MAX_TOKEN_LENGTH: usize = 128;

/// A live login session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque session token.
    pub token: String,
    /// When the session stops being valid.
    pub expires_at: DateTime<Utc>,
    /// User bound to this session.
    pub user_id: i64,
}

impl Session {
    /// Create a new session for a user with a fresh token.
    pub fn new(user_id: i64, lifetime: Duration) -> Self {
        Self::new_at(user_id, lifetime, Utc::now())
    }

    /// Create a new session expiring `lifetime` after `now`.
    ///
    /// A lifetime that cannot be represented from `now` falls back to
    /// [`DEFAULT_SESSION_DURATION_SECS`].
    pub fn new_at(user_id: i64, lifetime: Duration, now: DateTime<Utc>) -> Self {
        let fallback = chrono::Duration::seconds(DEFAULT_SESSION_DURATION_SECS as i64);
        let expires_at = chrono::Duration::from_std(lifetime)
            .ok()
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .unwrap_or(now + fallback);
        Self {
            token: generate_token(),
            expires_at,
            user_id,
        }
    }

    /// Time left until expiry, or `None` once expired.
    pub fn remaining(&self) -> Option<Duration> {
        self.remaining_at(Utc::now())
    }

    /// Time left until expiry as seen at `now`.
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Option<Duration> {
        let left = self.expires_at - now;
        if left <= chrono::Duration::zero() {
            return None;
        }
        left.to_std().ok()
    }

    /// Check whether the session has expired.
    pub fn is_expired(&self) -> bool {
        self.remaining().is_none()
    }
}

/// Generate a session token: 256 bits from the OS RNG, base64url without padding.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Cheap shape check run before a token reaches the session store.
pub fn looks_like_token(token: &str) -> bool {
    !token.is_empty()
        && token.len() <= MAX_TOKEN_LENGTH
        && token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
