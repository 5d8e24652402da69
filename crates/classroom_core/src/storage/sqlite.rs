//! SQLite-file storage backend.
//!
//! # Invariants
//! - Values live in the `kv_store` table created by migration 1.
//! - `set_item` is an upsert; `remove_item` on a missing key is a no-op.
//! - A non-text value surfaces as `DbError::CorruptValue`, never as a panic.

use super::{KeyValueStorage, StorageResult};
use crate::db::{open_db, open_db_in_memory, DbError};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Key/value storage persisted in a SQLite database.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens (or creates) the storage file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a throwaway in-memory database.
    pub fn open_in_memory() -> StorageResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KeyValueStorage for SqliteStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|err| match err {
                rusqlite::Error::InvalidColumnType(..) => DbError::CorruptValue {
                    key: key.to_string(),
                },
                other => DbError::Sqlite(other),
            })?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
        Ok(())
    }
}
