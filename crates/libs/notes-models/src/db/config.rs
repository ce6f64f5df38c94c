//! Database configuration.

use std::fmt::Display;

/// SQLite URL of a private in-memory database.
pub const IN_MEMORY_DATABASE: &str = ":memory:";

/// Database connection configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// SQLite database path or URL.
    pub database_url: String,
}

impl DbConfig {
    /// Configuration for the database at `database_url`.
    ///
    /// ```rust
    /// use notes_models::db::config::DbConfig;
    ///
    /// let config = DbConfig::new("notes.db");
    /// assert!(!config.is_in_memory());
    /// ```
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    /// Configuration for a throwaway in-memory database.
    pub fn in_memory() -> Self {
        Self::new(IN_MEMORY_DATABASE)
    }

    /// Whether this configuration points at an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.database_url == IN_MEMORY_DATABASE
    }
}

impl Display for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sqlite://{}", self.database_url)
    }
}
