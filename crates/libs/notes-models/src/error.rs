//! Database error types.

use diesel::result::DatabaseErrorKind;

/// Database operation errors.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Database connection pool error.
    #[error(transparent)]
    R2D2(#[from] diesel::r2d2::PoolError),

    /// Diesel ORM operation error.
    #[error(transparent)]
    Diesel(#[from] diesel::result::Error),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),
}

impl Error {
    /// Whether the error is a violated `UNIQUE` constraint.
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            Error::Diesel(diesel::result::Error::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                _
            ))
        )
    }
}
