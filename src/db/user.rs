//! User model for SessionGate.

/// A registered user. Never mutated after registration.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID, assigned on insert.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Login email (unique).
    pub email: String,
    /// Password hash (Argon2 PHC string).
    pub password: String,
    /// Profile image reference.
    pub image_path: Option<String>,
    /// Account creation timestamp.
    pub created_at: String,
}

/// Data for inserting a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Password hash (Argon2 PHC string).
    pub password: String,
    /// Profile image reference.
    pub image_path: Option<String>,
}

impl NewUser {
    /// Create a new user with the required fields.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password_hash.into(),
            image_path: None,
        }
    }

    /// Set the profile image reference.
    pub fn with_image_path(mut self, image_path: impl Into<String>) -> Self {
        self.image_path = Some(image_path.into());
        self
    }
}
