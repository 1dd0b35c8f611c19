//! CSRF token handler.

use axum::{extract::State, http::HeaderValue, response::IntoResponse, Json};
use std::sync::Arc;

use super::AppState;
use crate::auth::CSRF_HEADER;
use crate::web::dto::CsrfResponse;
use crate::web::error::ApiError;

/// GET /api/v1/csrf - Issue a CSRF token.
#[utoipa::path(
    get,
    path = "/api/v1/csrf",
    tag = "csrf",
    responses(
        (status = 200, description = "Fresh token, also returned in the X-CSRF-Token header", body = CsrfResponse)
    )
)]
pub async fn issue_csrf(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let token = state.csrf.issue();
    let header = HeaderValue::from_str(&token)
        .map_err(|_| ApiError::internal("Failed to issue CSRF token"))?;

    Ok(([(CSRF_HEADER, header)], Json(CsrfResponse { csrf: token })))
}
