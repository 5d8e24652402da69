//! Record stores over keyed blob storage.
//!
//! # Responsibility
//! - Own the in-memory class and task collections.
//! - Re-serialize a whole collection to storage after every mutation.
//!
//! # Invariants
//! - Stores are the only write path to the `classes` and `tasks` keys.
//! - Not-found on update/delete is a silent no-op, never an error.
//! - Stores never validate drafts and never check cross-store references.

use crate::storage::StorageError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod class_repo;
pub mod ids;
pub mod record_store;
pub mod task_repo;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of a mutating store operation.
#[derive(Debug)]
pub enum StoreError {
    /// The collection could not be written back to storage.
    Storage(StorageError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "failed to persist collection: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}
