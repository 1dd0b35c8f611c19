//! Router configuration for the Web API.

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use utoipa::OpenApi;

use super::handlers::{check, issue_csrf, login, logout, register, AppState};
use super::middleware::{access_log_layer, create_cors_layer, csrf_protect, require_session};
use super::openapi::ApiDoc;

/// Create the main API router.
///
/// Every request passes, in order, the access log, CORS and CSRF stages;
/// the protected routes additionally pass the auth stage. A stage that
/// answers stops the request there.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    // Auth routes (no session required)
    let auth_public_routes = Router::new()
        .route("/login", post(login))
        .route("/register", post(register));

    // Auth routes (session required)
    let auth_protected_routes = Router::new()
        .route("/logout", post(logout))
        .route("/check", post(check))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            require_session,
        ));

    let auth_routes = Router::new()
        .merge(auth_public_routes)
        .merge(auth_protected_routes);

    let api_routes = Router::new()
        .route("/csrf", get(issue_csrf))
        .nest("/auth", auth_routes);

    Router::new()
        .nest("/api/v1", api_routes)
        .merge(create_health_router())
        .merge(create_openapi_router())
        .layer(
            ServiceBuilder::new()
                .layer(access_log_layer())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn_with_state(
                    app_state.clone(),
                    csrf_protect,
                )),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router<S: Clone + Send + Sync + 'static>() -> Router<S> {
    Router::new().route("/health", get(health_check))
}

/// Create the router serving the OpenAPI document.
pub fn create_openapi_router<S: Clone + Send + Sync + 'static>() -> Router<S> {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
