//! Web API module for SessionGate.
//!
//! This module provides the HTTP surface and the ordered request
//! authorization pipeline in front of it.

pub mod cookie;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod server;

pub use cookie::SessionCookie;
pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
