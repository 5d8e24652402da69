//! SQLite bootstrap for the file-backed storage backend.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections with the pragmas core needs.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - No key/value read or write happens before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure inside the SQLite storage file.
#[derive(Debug)]
pub enum DbError {
    /// Connection-level or statement-level SQLite failure.
    Sqlite(rusqlite::Error),
    /// A migration script failed; nothing from that run was committed.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The file was written by a build with a newer schema.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// A `kv_store` row holds a value that is not text.
    CorruptValue { key: String },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
            Self::Migration { version, source } => {
                write!(f, "storage migration {version} failed: {source}")
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "storage schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::CorruptValue { key } => {
                write!(f, "kv_store value for `{key}` is not text")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::CorruptValue { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
