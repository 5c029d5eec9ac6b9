use thiserror::Error;

/// Errors that can occur when interacting with the entity store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A write referenced a missing row, or a delete would orphan
    /// referencing rows.
    #[error("Foreign key violation on {table}: {constraint}")]
    ForeignKeyViolation {
        table: &'static str,
        constraint: String,
    },

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for entity store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// SQLSTATE raised by PostgreSQL for foreign key violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Maps a failed write into a store error, recognizing foreign key
/// violations so callers can react to them.
pub(crate) fn map_write_error(table: &'static str, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION)
    {
        return StoreError::ForeignKeyViolation {
            table,
            constraint: db_err.constraint().unwrap_or_default().to_string(),
        };
    }
    StoreError::Database(err)
}
