//! Session authentication middleware.

use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, State},
    http::{request::Parts, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Identity attached to a request by [`require_session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentSession {
    /// User bound to the session.
    pub user_id: i64,
    /// The session token from the cookie.
    pub token: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentSession>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("unauthorized"))
    }
}

/// Auth stage: let the request through only with a live session cookie.
///
/// The resolved identity is inserted into the request extensions for
/// handlers to pick up with the [`CurrentSession`] extractor.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(token) = state.cookie.read(request.headers()) else {
        tracing::debug!("No session cookie on {}", request.uri().path());
        return ApiError::unauthorized("unauthorized").into_response();
    };

    match state.auth.resolve(&token).await {
        Ok(Some(user_id)) => {
            request
                .extensions_mut()
                .insert(CurrentSession { user_id, token });
            next.run(request).await
        }
        Ok(None) => {
            tracing::debug!("Unknown or expired session on {}", request.uri().path());
            ApiError::unauthorized("unauthorized").into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
