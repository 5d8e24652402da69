//! Keyed blob storage shared by the record stores.
//!
//! # Responsibility
//! - Define the string-keyed, string-valued storage contract the stores persist into.
//! - Provide an in-memory backend for tests and ephemeral sessions.
//!
//! # Invariants
//! - Writes replace the whole value for a key (last writer wins).
//! - Backends are single-threaded; sharing happens through `Rc` or `&`.

use crate::db::DbError;
use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

mod sqlite;

pub use sqlite::SqliteStorage;

/// Storage key holding the class collection.
pub const CLASSES_KEY: &str = "classes";
/// Storage key holding the task collection.
pub const TASKS_KEY: &str = "tasks";
/// Storage key holding the signed-in user record.
pub const USER_KEY: &str = "user";

pub type StorageResult<T> = Result<T, StorageError>;

/// Backend-level storage failure.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Encode(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode stored value: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// String key/value storage, modelled on browser local storage.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &T {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        (**self).remove_item(key)
    }
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Rc<T> {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        (**self).remove_item(key)
    }
}

/// Process-local storage backend. Contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStorage, MemoryStorage};
    use std::rc::Rc;

    #[test]
    fn memory_storage_replaces_and_removes_values() {
        let storage = MemoryStorage::new();
        assert!(storage.get_item("tasks").unwrap().is_none());

        storage.set_item("tasks", "[]").unwrap();
        storage.set_item("tasks", "[1]").unwrap();
        assert_eq!(storage.get_item("tasks").unwrap().as_deref(), Some("[1]"));
        assert_eq!(storage.len(), 1);

        storage.remove_item("tasks").unwrap();
        storage.remove_item("tasks").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn shared_handles_see_the_same_items() {
        let storage = Rc::new(MemoryStorage::new());
        let writer = Rc::clone(&storage);
        writer.set_item("user", "{}").unwrap();

        let by_ref = &*storage;
        assert_eq!(by_ref.get_item("user").unwrap().as_deref(), Some("{}"));
    }
}
