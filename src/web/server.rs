//! Web server for SessionGate.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::auth::{AuthPolicy, AuthService, CsrfTokens};
use crate::config::{Config, ServerConfig};
use crate::db::{Database, SqliteUserDirectory};
use crate::store;
use crate::{GateError, Result};

use super::cookie::SessionCookie;
use super::handlers::AppState;
use super::router::create_router;

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Allowed CORS origins.
    cors_origins: Vec<String>,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(
        config: &ServerConfig,
        app_state: Arc<AppState>,
        cors_origins: Vec<String>,
    ) -> Result<Self> {
        let addr = format!("{}:{}", config.host, config.port)
            .parse()
            .map_err(|e| GateError::Config(format!("invalid server address: {e}")))?;

        Ok(Self {
            addr,
            app_state,
            cors_origins,
        })
    }

    /// Build the whole service from configuration: user directory, session
    /// store, auth orchestrator and CSRF tokens.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let db = Database::open(&config.database.path).await?;
        let users = Arc::new(SqliteUserDirectory::new(db.pool().clone()));
        let sessions = store::open(&config.session_store).await?;

        let auth = AuthService::new(users, sessions, AuthPolicy::from(&config.session));
        let csrf = CsrfTokens::from_config(&config.csrf)
            .map_err(|e| GateError::Config(e.to_string()))?;
        let app_state = AppState::new(auth, csrf, SessionCookie::from(&config.session));

        Self::new(&config.server, Arc::new(app_state), config.cors.origins.clone())
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn router(&self) -> Router {
        create_router(self.app_state.clone(), &self.cors_origins)
    }

    /// Run the web server until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        let router = self.router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Web server stopped");
        Ok(())
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr> {
        let router = self.router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
