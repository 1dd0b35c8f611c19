//! Database schema and migrations for SessionGate.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Users table
    r#"
CREATE TABLE users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    email       TEXT NOT NULL UNIQUE,    -- login key, compared as stored
    password    TEXT NOT NULL,           -- Argon2 PHC string
    image_path  TEXT,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
];
