//! Request authorization pipeline stages.

pub mod access_log;
pub mod auth;
pub mod cors;
pub mod csrf;

pub use access_log::access_log_layer;
pub use auth::{require_session, CurrentSession};
pub use cors::create_cors_layer;
pub use csrf::{csrf_protect, is_safe_method};
