//! Authentication handlers.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::auth::{AuthService, Credentials, CsrfTokens, Registration};
use crate::web::cookie::SessionCookie;
use crate::web::dto::{IdResponse, LoginRequest, RegisterRequest, ValidatedJson};
use crate::web::error::{ApiError, ErrorBody};
use crate::web::middleware::CurrentSession;

/// Application state shared across handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    /// Auth orchestrator.
    pub auth: AuthService,
    /// CSRF token service.
    pub csrf: CsrfTokens,
    /// Session cookie attributes.
    pub cookie: SessionCookie,
}

impl AppState {
    /// Create a new application state.
    pub fn new(auth: AuthService, csrf: CsrfTokens, cookie: SessionCookie) -> Self {
        Self { auth, csrf, cookie }
    }

    /// Reject the request if it already carries a live session.
    async fn ensure_anonymous(&self, headers: &HeaderMap) -> Result<(), ApiError> {
        let Some(token) = self.cookie.read(headers) else {
            return Ok(());
        };
        if self.auth.is_auth(&token).await? {
            return Err(ApiError::forbidden("you must be unauthorised"));
        }
        Ok(())
    }
}

/// POST /api/v1/auth/login - Open a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; session cookie set", body = IdResponse),
        (status = 400, description = "Malformed body", body = ErrorBody),
        (status = 401, description = "Wrong credentials", body = ErrorBody),
        (status = 403, description = "Already authenticated or CSRF failure", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    ),
    params(("X-CSRF-Token" = String, Header, description = "CSRF token from /api/v1/csrf"))
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.ensure_anonymous(&headers).await?;

    let credentials = Credentials::new(&req.email, req.password);
    let session = state.auth.login(&credentials).await?;

    let mut response_headers = HeaderMap::new();
    state.cookie.set(&mut response_headers, &session)?;

    Ok((
        response_headers,
        Json(IdResponse {
            id: session.user_id,
        }),
    ))
}

/// POST /api/v1/auth/register - Create a user and log it in.
///
/// The two steps are not atomic. If the login step fails the account still
/// exists: the client gets the login error and a retry answers 403.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registered and logged in; session cookie set", body = IdResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 403, description = "Email taken, already authenticated or CSRF failure", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    ),
    params(("X-CSRF-Token" = String, Header, description = "CSRF token from /api/v1/csrf"))
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.ensure_anonymous(&headers).await?;

    let registration =
        Registration::new(req.name, &req.email, req.password).with_image_path(req.image_path);
    let id = state.auth.register(&registration).await?;
    let session = state.auth.login(&registration.credentials()).await?;

    let mut response_headers = HeaderMap::new();
    state.cookie.set(&mut response_headers, &session)?;

    Ok((response_headers, Json(IdResponse { id })))
}

/// POST /api/v1/auth/logout - End the current session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "auth",
    responses(
        (status = 204, description = "Logged out; session cookie cleared"),
        (status = 401, description = "No live session", body = ErrorBody),
        (status = 403, description = "CSRF failure", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    ),
    params(("X-CSRF-Token" = String, Header, description = "CSRF token from /api/v1/csrf")),
    security(("session_cookie" = []))
)]
pub async fn logout(
    State(state): State<Arc<AppState>>,
    session: CurrentSession,
) -> Result<impl IntoResponse, ApiError> {
    state.auth.logout(&session.token).await?;

    let mut response_headers = HeaderMap::new();
    state.cookie.clear(&mut response_headers)?;

    Ok((StatusCode::NO_CONTENT, response_headers))
}

/// POST /api/v1/auth/check - Probe whether the session is live.
///
/// The auth stage answers 401 before this runs when it is not.
#[utoipa::path(
    post,
    path = "/api/v1/auth/check",
    tag = "auth",
    responses(
        (status = 204, description = "Session is live"),
        (status = 401, description = "No live session", body = ErrorBody),
        (status = 403, description = "CSRF failure", body = ErrorBody)
    ),
    params(("X-CSRF-Token" = String, Header, description = "CSRF token from /api/v1/csrf")),
    security(("session_cookie" = []))
)]
pub async fn check() -> StatusCode {
    StatusCode::NO_CONTENT
}
