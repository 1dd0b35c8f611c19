//! CORS middleware configuration.

use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use crate::auth::CSRF_HEADER;

/// Create a CORS layer from configuration.
///
/// Preflight requests are answered by the layer itself and never reach the
/// later stages. The CSRF header is exposed so browsers can read it.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];
    let csrf_header = HeaderName::from_static(CSRF_HEADER);

    let parsed_origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

    if parsed_origins.is_empty() {
        // Any origin, but without credentials
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers(Any)
            .allow_origin(Any)
            .expose_headers([csrf_header])
    } else {
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers([CONTENT_TYPE, ACCEPT, csrf_header.clone()])
            .expose_headers([csrf_header])
            .allow_credentials(true)
            .allow_origin(parsed_origins)
    }
}
