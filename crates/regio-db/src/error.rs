//! Database error types for regio-db.

use regio_core::StoreError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned something unexpected.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// A UNIQUE constraint rejected the write.
    #[error("Duplicate row: {0}")]
    Duplicate(String),

    /// A FOREIGN KEY constraint rejected the write.
    #[error("Missing parent row: {0}")]
    MissingParent(String),

    /// Could not prepare the database location.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}

impl DatabaseError {
    /// Sort a failed write into the constraint it hit, if any.
    ///
    /// libSQL reports constraint violations only through the message text.
    pub fn from_write(e: libsql::Error) -> Self {
        let msg = e.to_string();
        if msg.contains("UNIQUE constraint failed") {
            Self::Duplicate(msg)
        } else if msg.contains("FOREIGN KEY constraint failed") {
            Self::MissingParent(msg)
        } else {
            Self::LibSql(e)
        }
    }
}

impl From<DatabaseError> for StoreError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Duplicate(msg) => Self::DuplicateKey(msg),
            DatabaseError::MissingParent(msg) => Self::MissingParent(msg),
            other => Self::Backend(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_variants_map_to_store_kinds() {
        let dup: StoreError = DatabaseError::Duplicate("provinces.code".into()).into();
        assert!(dup.is_duplicate());

        let orphan: StoreError = DatabaseError::MissingParent("cities".into()).into();
        assert!(matches!(orphan, StoreError::MissingParent(_)));

        let other: StoreError = DatabaseError::NoResult.into();
        assert_eq!(other, StoreError::Backend("No result returned".into()));
    }
}
