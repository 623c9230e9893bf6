//! Cantoria integration test support.
//!
//! Re-exports the workspace crates so the HTTP scenarios under `tests/` can
//! reach the server, the store and the service layer through one path.

pub use cantoria_app;
pub use cantoria_core;
pub use cantoria_db;
pub use cantoria_service;

/// Environment variable naming the PostgreSQL server used by integration tests.
pub const TEST_DATABASE_URL_VAR: &str = "CANTORIA_TEST_DATABASE_URL";

/// The configured test database URL, if any.
#[must_use]
pub fn test_database_url() -> Option<String> {
    std::env::var(TEST_DATABASE_URL_VAR)
        .ok()
        .filter(|url| !url.trim().is_empty())
}
