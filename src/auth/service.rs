//! Login, registration and session lifecycle.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use super::password::{
    hash_password_async, verify_dummy_async, verify_password_async, PasswordError,
};
use super::session::{looks_like_token, Session, DEFAULT_SESSION_DURATION_SECS};
use super::validation::{
    normalize_email, validate_credentials, validate_email, validate_password, Credentials,
};
use crate::config::SessionConfig;
use crate::db::{NewUser, UserDirectory};
use crate::store::SessionStore;
use crate::{GateError, Result};

/// Default deadline for a single session store or user directory call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(3);

/// Session and call policy, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthPolicy {
    /// How long a session lives after login.
    pub session_lifetime: Duration,
    /// Deadline for each collaborator call.
    pub call_timeout: Duration,
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self {
            session_lifetime: Duration::from_secs(DEFAULT_SESSION_DURATION_SECS),
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }
}

impl From<&SessionConfig> for AuthPolicy {
    fn from(config: &SessionConfig) -> Self {
        Self {
            session_lifetime: config.lifetime(),
            call_timeout: config.call_timeout(),
        }
    }
}

/// A registration request.
#[derive(Clone)]
pub struct Registration {
    /// Display name.
    pub name: String,
    /// Login email, trimmed.
    pub email: String,
    /// Plaintext password bytes.
    pub password: Vec<u8>,
    /// Profile image reference.
    pub image_path: Option<String>,
}

impl Registration {
    /// Create a registration with the email trimmed of surrounding whitespace.
    pub fn new(name: impl Into<String>, email: &str, password: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            email: normalize_email(email),
            password: password.into(),
            image_path: None,
        }
    }

    /// Set the profile image reference.
    pub fn with_image_path(mut self, image_path: Option<String>) -> Self {
        self.image_path = image_path;
        self
    }

    /// The credentials this registration can log in with.
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("image_path", &self.image_path)
            .finish()
    }
}

/// Auth orchestrator over a user directory and a session store.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserDirectory>,
    sessions: Arc<dyn SessionStore>,
    policy: AuthPolicy,
}

impl AuthService {
    /// Create a new auth service.
    pub fn new(
        users: Arc<dyn UserDirectory>,
        sessions: Arc<dyn SessionStore>,
        policy: AuthPolicy,
    ) -> Self {
        Self {
            users,
            sessions,
            policy,
        }
    }

    /// The policy this service was built with.
    pub fn policy(&self) -> AuthPolicy {
        self.policy
    }

    /// Authenticate credentials and open a new session.
    ///
    /// Every credential failure, whatever its cause, is reported as
    /// `GateError::WrongCredentials`.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        if let Err(e) = validate_credentials(credentials) {
            debug!("Login rejected before lookup: {}", e);
            return Err(GateError::WrongCredentials);
        }

        let Some(user) = self
            .bounded("user directory", self.users.get_by_email(&credentials.email))
            .await?
        else {
            debug!("Login for unknown email");
            if let Err(e) = verify_dummy_async(credentials.password.clone()).await {
                warn!("Dummy password check failed: {}", e);
            }
            return Err(GateError::WrongCredentials);
        };

        match verify_password_async(credentials.password.clone(), user.password.clone()).await {
            Ok(()) => {}
            Err(PasswordError::VerificationFailed) => {
                debug!("Wrong password for user {}", user.id);
                return Err(GateError::WrongCredentials);
            }
            Err(e) => {
                error!("Password check failed for user {}: {}", user.id, e);
                return Err(GateError::Internal(e.to_string()));
            }
        }

        let session = Session::new(user.id, self.policy.session_lifetime);
        self.bounded("session store", self.sessions.add(&session))
            .await?;

        info!("User {} logged in", user.id);
        Ok(session)
    }

    /// Register a new user and return its ID. Does not open a session.
    pub async fn register(&self, registration: &Registration) -> Result<i64> {
        validate_email(&registration.email).map_err(|e| GateError::BadRequest(e.to_string()))?;
        validate_password(&registration.password)
            .map_err(|e| GateError::BadRequest(e.to_string()))?;

        if self
            .bounded("user directory", self.users.user_exists(&registration.email))
            .await?
        {
            debug!("Registration for existing email");
            return Err(GateError::Conflict("user".to_string()));
        }

        let hash = hash_password_async(registration.password.clone())
            .await
            .map_err(|e| GateError::Internal(e.to_string()))?;

        let new_user = NewUser {
            name: registration.name.clone(),
            email: registration.email.clone(),
            password: hash,
            image_path: registration.image_path.clone(),
        };
        // The directory's uniqueness constraint settles concurrent registrations.
        let id = self
            .bounded("user directory", self.users.add_user(&new_user))
            .await?;

        info!("Registered user {}", id);
        Ok(id)
    }

    /// End a session. Unknown or empty tokens are a no-op.
    pub async fn logout(&self, token: &str) -> Result<()> {
        if token.is_empty() {
            return Ok(());
        }
        self.bounded("session store", self.sessions.delete_by_token(token))
            .await?;
        debug!("Session closed");
        Ok(())
    }

    /// Whether the token belongs to a live session.
    pub async fn is_auth(&self, token: &str) -> Result<bool> {
        if !looks_like_token(token) {
            return Ok(false);
        }
        self.bounded("session store", self.sessions.session_exists(token))
            .await
    }

    /// The user bound to the token, if its session is live.
    pub async fn resolve(&self, token: &str) -> Result<Option<i64>> {
        if !looks_like_token(token) {
            return Ok(None);
        }
        self.bounded("session store", self.sessions.user_id(token))
            .await
    }

    async fn bounded<T>(&self, what: &str, call: impl Future<Output = Result<T>>) -> Result<T> {
        match tokio::time::timeout(self.policy.call_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!("{} call exceeded {:?}", what, self.policy.call_timeout);
                Err(GateError::Timeout(what.to_string()))
            }
        }
    }
}
