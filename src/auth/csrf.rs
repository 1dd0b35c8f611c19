//! Stateless CSRF tokens.
//!
//! A token is `<nonce>.<expiry>.<mac>` where `nonce` is 16 random bytes,
//! `expiry` is a unix timestamp in seconds and `mac` is
//! HMAC-SHA256(secret, nonce || expiry). Nonce and MAC are base64url without
//! padding. Verification needs nothing but the secret.

use std::time::Duration;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use rand_core::{OsRng, RngCore};
use sha2::Sha256;
use thiserror::Error;
use tracing::warn;

use crate::config::CsrfConfig;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the CSRF token in both directions.
pub const CSRF_HEADER: &str = "x-csrf-token";

const NONCE_BYTES: usize = 16;
const GENERATED_SECRET_BYTES: usize = 32;

/// CSRF verification errors. All of them end up as 403.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CsrfError {
    /// No token was supplied.
    #[error("csrf token missing")]
    Missing,

    /// The token is not in `<nonce>.<expiry>.<mac>` form.
    #[error("csrf token malformed")]
    Malformed,

    /// The MAC does not match.
    #[error("csrf token signature mismatch")]
    BadSignature,

    /// The token's window has passed.
    #[error("csrf token expired")]
    Expired,

    /// The secret cannot key the MAC.
    #[error("invalid csrf secret")]
    InvalidKey,
}

/// Issues and verifies CSRF tokens under one process-wide secret.
#[derive(Clone)]
pub struct CsrfTokens {
    mac: HmacSha256,
    ttl: Duration,
}

impl std::fmt::Debug for CsrfTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsrfTokens")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl CsrfTokens {
    /// Create a token service keyed with `secret`.
    pub fn new(secret: &[u8], ttl: Duration) -> Result<Self, CsrfError> {
        let mac = HmacSha256::new_from_slice(secret).map_err(|_| CsrfError::InvalidKey)?;
        Ok(Self { mac, ttl })
    }

    /// Build from configuration, generating a random secret when none is set.
    pub fn from_config(config: &CsrfConfig) -> Result<Self, CsrfError> {
        let ttl = Duration::from_secs(config.token_ttl_secs);
        if config.secret.is_empty() {
            warn!("No CSRF secret configured; generated a random one. Tokens will not survive a restart.");
            let mut secret = [0u8; GENERATED_SECRET_BYTES];
            OsRng.fill_bytes(&mut secret);
            return Self::new(&secret, ttl);
        }
        Self::new(config.secret.as_bytes(), ttl)
    }

    /// How long issued tokens stay valid.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a fresh token.
    pub fn issue(&self) -> String {
        self.issue_at(Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now` (unix seconds).
    pub fn issue_at(&self, now: i64) -> String {
        let mut nonce = [0u8; NONCE_BYTES];
        OsRng.fill_bytes(&mut nonce);
        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let expiry = now.saturating_add(ttl);

        let tag = self.sign(&nonce, expiry).finalize().into_bytes();
        format!(
            "{}.{}.{}",
            URL_SAFE_NO_PAD.encode(nonce),
            expiry,
            URL_SAFE_NO_PAD.encode(tag)
        )
    }

    /// Verify a token against the current time.
    pub fn verify(&self, token: &str) -> Result<(), CsrfError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token as if the current time were `now` (unix seconds).
    pub fn verify_at(&self, token: &str, now: i64) -> Result<(), CsrfError> {
        if token.is_empty() {
            return Err(CsrfError::Missing);
        }

        let mut parts = token.split('.');
        let (Some(nonce), Some(expiry), Some(tag), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(CsrfError::Malformed);
        };

        let nonce = URL_SAFE_NO_PAD
            .decode(nonce)
            .map_err(|_| CsrfError::Malformed)?;
        if nonce.len() != NONCE_BYTES {
            return Err(CsrfError::Malformed);
        }
        let expiry: i64 = expiry.parse().map_err(|_| CsrfError::Malformed)?;
        let tag = URL_SAFE_NO_PAD.decode(tag).map_err(|_| CsrfError::Malformed)?;

        // Constant-time comparison
        self.sign(&nonce, expiry)
            .verify_slice(&tag)
            .map_err(|_| CsrfError::BadSignature)?;

        if expiry <= now {
            return Err(CsrfError::Expired);
        }
        Ok(())
    }

    fn sign(&self, nonce: &[u8], expiry: i64) -> HmacSha256 {
        let mut mac = self.mac.clone();
        mac.update(nonce);
        mac.update(expiry.to_string().as_bytes());
        mac
    }
}
