//! Request DTOs for Web API.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::validation::no_control_chars;

/// Login request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Login email. Surrounding whitespace is ignored.
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Password.
    pub password: String,
}

/// User registration request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Display name.
    #[serde(default)]
    #[validate(
        length(max = 64, message = "must be at most 64 characters"),
        custom(function = "no_control_chars")
    )]
    pub name: String,
    /// Login email. Surrounding whitespace is ignored.
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Password.
    pub password: String,
    /// Profile image reference (optional).
    #[serde(default)]
    #[validate(length(max = 1024, message = "must be at most 1024 characters"))]
    pub image_path: Option<String>,
}
