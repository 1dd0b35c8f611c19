//! API handlers for SessionGate.

pub mod auth;
pub mod csrf;

pub use auth::*;
pub use csrf::*;
