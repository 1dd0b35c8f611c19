//! Configuration module for SessionGate.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::{GateError, Result};

/// Minimum accepted length of an explicitly configured CSRF secret.
pub const MIN_CSRF_SECRET_LENGTH: usize = 16;

/// Longest accepted session lifetime (one year).
pub const MAX_SESSION_LIFETIME_SECS: u64 = 365 * 24 * 60 * 60;

/// Longest accepted CSRF token validity window (one week).
pub const MAX_CSRF_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// User directory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/sessiongate.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Session store backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// In-process map, lost on restart.
    #[default]
    Memory,
    /// Redis server.
    Redis,
}

/// Session store configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SessionStoreConfig {
    /// Which backend to use.
    #[serde(default)]
    pub backend: SessionBackend,
    /// Connection URL (required for redis), e.g. `redis://127.0.0.1:6379`.
    #[serde(default)]
    pub url: String,
}

/// Session lifetime and cookie configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Session lifetime in seconds.
    #[serde(default = "default_session_lifetime")]
    pub lifetime_secs: u64,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Whether to set the `Secure` cookie attribute.
    #[serde(default)]
    pub cookie_secure: bool,
    /// `SameSite` cookie attribute (Strict, Lax, None). Empty omits it.
    #[serde(default = "default_same_site")]
    pub cookie_same_site: String,
    /// Deadline for each session store / user directory call, in milliseconds.
    #[serde(default = "default_call_timeout")]
    pub call_timeout_ms: u64,
}

fn default_session_lifetime() -> u64 {
    24 * 60 * 60
}

fn default_cookie_name() -> String {
    "session_token".to_string()
}

fn default_same_site() -> String {
    "Lax".to_string()
}

fn default_call_timeout() -> u64 {
    3000
}

impl SessionConfig {
    /// Session lifetime as a duration.
    pub fn lifetime(&self) -> Duration {
        Duration::from_secs(self.lifetime_secs)
    }

    /// Collaborator call deadline as a duration.
    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            lifetime_secs: default_session_lifetime(),
            cookie_name: default_cookie_name(),
            cookie_secure: false,
            cookie_same_site: default_same_site(),
            call_timeout_ms: default_call_timeout(),
        }
    }
}

/// CSRF token configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CsrfConfig {
    /// HMAC secret. When empty a random secret is generated at startup.
    #[serde(default)]
    pub secret: String,
    /// How long an issued token stays valid, in seconds.
    #[serde(default = "default_csrf_ttl")]
    pub token_ttl_secs: u64,
}

fn default_csrf_ttl() -> u64 {
    60 * 60
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            token_ttl_secs: default_csrf_ttl(),
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CorsConfig {
    /// Allowed origins. Empty means any origin, without credentials.
    #[serde(default)]
    pub origins: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional log file; stdout only when unset.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// User directory configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Session store configuration.
    #[serde(default)]
    pub session_store: SessionStoreConfig,
    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// CSRF configuration.
    #[serde(default)]
    pub csrf: CsrfConfig,
    /// CORS configuration.
    #[serde(default)]
    pub cors: CorsConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(GateError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| GateError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `SESSIONGATE_CSRF_SECRET`: CSRF HMAC secret
    /// - `SESSIONGATE_REDIS_URL`: session store URL (switches the backend to redis)
    /// - `SERVER_PORT`: listen port
    ///
    /// Empty or unparsable values are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(secret) = std::env::var("SESSIONGATE_CSRF_SECRET") {
            if !secret.is_empty() {
                self.csrf.secret = secret;
            }
        }

        if let Ok(url) = std::env::var("SESSIONGATE_REDIS_URL") {
            if !url.is_empty() {
                self.session_store.backend = SessionBackend::Redis;
                self.session_store.url = url;
            }
        }

        if let Ok(port) = std::env::var("SERVER_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.csrf.secret.is_empty() && self.csrf.secret.len() < MIN_CSRF_SECRET_LENGTH {
            return Err(GateError::Config(format!(
                "csrf.secret must be at least {MIN_CSRF_SECRET_LENGTH} bytes"
            )));
        }
        if self.csrf.token_ttl_secs == 0 || self.csrf.token_ttl_secs > MAX_CSRF_TTL_SECS {
            return Err(GateError::Config(format!(
                "csrf.token_ttl_secs must be between 1 and {MAX_CSRF_TTL_SECS}"
            )));
        }
        if self.session.lifetime_secs == 0 || self.session.lifetime_secs > MAX_SESSION_LIFETIME_SECS
        {
            return Err(GateError::Config(format!(
                "session.lifetime_secs must be between 1 and {MAX_SESSION_LIFETIME_SECS}"
            )));
        }
        if self.session.cookie_name.is_empty() {
            return Err(GateError::Config(
                "session.cookie_name must not be empty".to_string(),
            ));
        }
        if self.session_store.backend == SessionBackend::Redis && self.session_store.url.is_empty()
        {
            return Err(GateError::Config(
                "session_store.url is required for the redis backend. \
                 Set it in config.toml or via SESSIONGATE_REDIS_URL."
                    .to_string(),
            ));
        }
        Ok(())
    }
}
