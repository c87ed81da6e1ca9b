//! SQLite-backed snapshot storage.

use crate::db::error::DbError;
use crate::db::schema::{SCHEMA, SCHEMA_VERSION};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use studyflow_core::{Storage, StorageError, STORAGE_KEY};

type Result<T> = std::result::Result<T, DbError>;

/// Stores the card snapshot as one row of a key-value table.
pub struct SqliteStorage {
    conn: Connection,
    key: String,
}

impl SqliteStorage {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::initialize(Connection::open(path)?)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        Self::initialize(Connection::open_in_memory()?)
    }

    /// Use a different row key than the default snapshot key.
    #[cfg(test)]
    fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    fn initialize(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;
        Ok(Self {
            conn,
            key: STORAGE_KEY.to_string(),
        })
    }

    #[cfg(test)]
    fn schema_version(&self) -> Result<i32> {
        let version = self
            .conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
        Ok(version)
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    #[cfg(test)]
    fn remove(&self, key: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(removed > 0)
    }
}

impl Storage for SqliteStorage {
    fn load(&self) -> studyflow_core::Result<Option<Vec<u8>>> {
        Ok(self.get(&self.key)?.map(String::into_bytes))
    }

    fn save(&self, bytes: &[u8]) -> studyflow_core::Result<()> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| StorageError::from(DbError::InvalidData(e.to_string())))?;
        self.set(&self.key, text)?;
        Ok(())
    }
}
