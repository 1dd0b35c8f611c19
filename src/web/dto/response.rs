//! Response DTOs for Web API.

use serde::Serialize;
use utoipa::ToSchema;

/// Response carrying a user ID.
#[derive(Debug, Serialize, ToSchema)]
pub struct IdResponse {
    /// User ID.
    pub id: i64,
}

/// Response carrying a freshly issued CSRF token.
#[derive(Debug, Serialize, ToSchema)]
pub struct CsrfResponse {
    /// Token to echo in the `X-CSRF-Token` header.
    pub csrf: String,
}
