//! CSRF protection middleware.

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::auth::{CsrfError, CSRF_HEADER};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Whether the method cannot change server state.
pub fn is_safe_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::HEAD | Method::OPTIONS | Method::TRACE
    )
}

/// CSRF stage: state-changing requests must carry a valid `X-CSRF-Token`.
pub async fn csrf_protect(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if is_safe_method(request.method()) {
        return next.run(request).await;
    }

    let token = request
        .headers()
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    match state.csrf.verify(token) {
        Ok(()) => next.run(request).await,
        Err(e) => {
            if e == CsrfError::Missing {
                tracing::debug!("{} {} without CSRF token", request.method(), request.uri().path());
            } else {
                tracing::warn!("{} {} rejected: {}", request.method(), request.uri().path(), e);
            }
            ApiError::from(e).into_response()
        }
    }
}
