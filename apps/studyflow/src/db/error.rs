//! Database error types.

use studyflow_core::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl From<DbError> for StorageError {
    fn from(e: DbError) -> Self {
        StorageError::Unavailable(e.to_string())
    }
}
