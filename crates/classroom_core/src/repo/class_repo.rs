//! Class store: the `classes` collection.

use super::record_store::{Record, RecordStore};
use crate::model::class::{seed_classes, Class, ClassDraft, ClassPatch};
use crate::storage::CLASSES_KEY;
use chrono::NaiveDate;

/// Persisted class collection.
///
/// Deleting a class never touches tasks that reference it.
pub type ClassStore<S> = RecordStore<Class, S>;

impl Record for Class {
    type Draft = ClassDraft;
    type Patch = ClassPatch;

    const STORAGE_KEY: &'static str = CLASSES_KEY;

    fn id(&self) -> i64 {
        self.id
    }

    fn seed() -> Vec<Self> {
        seed_classes()
    }

    fn create(draft: ClassDraft, id: i64, created_at: NaiveDate) -> Self {
        Class::from_draft(draft, id, created_at)
    }

    fn merge(&mut self, patch: ClassPatch) {
        self.apply(patch);
    }
}
