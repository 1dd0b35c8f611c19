//! OpenAPI document for the HTTP surface.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::dto::{CsrfResponse, IdResponse, LoginRequest, RegisterRequest};
use super::error::ErrorBody;
use super::handlers;

/// OpenAPI document, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(title = "SessionGate", description = "Session authentication API"),
    paths(
        handlers::issue_csrf,
        handlers::login,
        handlers::register,
        handlers::logout,
        handlers::check,
    ),
    components(schemas(LoginRequest, RegisterRequest, IdResponse, CsrfResponse, ErrorBody)),
    modifiers(&SessionCookieScheme),
    tags(
        (name = "auth", description = "Login, registration and session checks"),
        (name = "csrf", description = "CSRF token issuance")
    )
)]
pub struct ApiDoc;

struct SessionCookieScheme;

impl Modify for SessionCookieScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("session_token"))),
            );
        }
    }
}
