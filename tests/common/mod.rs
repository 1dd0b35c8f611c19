//! Test helpers for Web API integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::HeaderName;
use axum_test::{TestResponse, TestServer};
use serde_json::json;

use sessiongate::web::{create_router, AppState, SessionCookie};
use sessiongate::{
    AuthPolicy, AuthService, CsrfTokens, Database, MemorySessionStore, SqliteUserDirectory,
};

/// CSRF secret shared by all test servers.
pub const TEST_CSRF_SECRET: &[u8] = b"test-secret-key-for-testing-only";

/// Header carrying the CSRF token.
pub fn csrf_header() -> HeaderName {
    HeaderName::from_static("x-csrf-token")
}

/// Build app state over an in-memory database and memory session store.
pub async fn create_test_state() -> Arc<AppState> {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let auth = AuthService::new(
        Arc::new(SqliteUserDirectory::new(db.pool().clone())),
        Arc::new(MemorySessionStore::new()),
        AuthPolicy::default(),
    );
    let csrf = CsrfTokens::new(TEST_CSRF_SECRET, Duration::from_secs(3600))
        .expect("Failed to create CSRF tokens");

    Arc::new(AppState::new(auth, csrf, SessionCookie::default()))
}

/// Create a test server with the full pipeline.
pub async fn create_test_server() -> TestServer {
    create_test_server_with_origins(&[]).await
}

/// Create a test server with the given CORS origins.
pub async fn create_test_server_with_origins(origins: &[String]) -> TestServer {
    let router = create_router(create_test_state().await, origins);
    TestServer::new(router).expect("Failed to create test server")
}

/// Fetch a fresh CSRF token.
pub async fn csrf_token(server: &TestServer) -> String {
    let response = server.get("/api/v1/csrf").await;
    response.assert_status_ok();
    response.json::<serde_json::Value>()["csrf"]
        .as_str()
        .expect("csrf field")
        .to_string()
}

/// Extract the `session_token` value from the first matching `Set-Cookie`.
pub fn session_cookie(response: &TestResponse) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|v| v.strip_prefix("session_token="))
        .map(|rest| rest.split(';').next().unwrap_or("").to_string())
}

/// The raw `Set-Cookie` header for the session cookie.
pub fn raw_session_cookie(response: &TestResponse) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("session_token="))
        .map(str::to_string)
}

/// `Cookie` header value for a session token.
pub fn cookie_value(token: &str) -> String {
    format!("session_token={token}")
}

/// POST a JSON body with a CSRF token and optional session cookie.
pub async fn post_json(
    server: &TestServer,
    path: &str,
    body: &serde_json::Value,
    token: Option<&str>,
) -> TestResponse {
    let csrf = csrf_token(server).await;
    let mut request = server.post(path).add_header(csrf_header(), csrf).json(body);
    if let Some(token) = token {
        request = request.add_header(COOKIE, cookie_value(token));
    }
    request.await
}

/// POST with no body, a CSRF token and optional session cookie.
pub async fn post_empty(server: &TestServer, path: &str, token: Option<&str>) -> TestResponse {
    let csrf = csrf_token(server).await;
    let mut request = server.post(path).add_header(csrf_header(), csrf);
    if let Some(token) = token {
        request = request.add_header(COOKIE, cookie_value(token));
    }
    request.await
}

/// Register a user and return the response.
pub async fn register(server: &TestServer, name: &str, email: &str, password: &str) -> TestResponse {
    post_json(
        server,
        "/api/v1/auth/register",
        &json!({ "name": name, "email": email, "password": password }),
        None,
    )
    .await
}

/// Log in and return the response.
pub async fn login(server: &TestServer, email: &str, password: &str) -> TestResponse {
    post_json(
        server,
        "/api/v1/auth/login",
        &json!({ "email": email, "password": password }),
        None,
    )
    .await
}
