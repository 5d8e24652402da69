//! Task store: the `tasks` collection plus the per-class query.

use super::record_store::{Record, RecordStore};
use crate::model::class::ClassId;
use crate::model::task::{seed_tasks, Task, TaskDraft, TaskPatch};
use crate::storage::{KeyValueStorage, TASKS_KEY};
use chrono::NaiveDate;

/// Persisted task collection.
pub type TaskStore<S> = RecordStore<Task, S>;

impl Record for Task {
    type Draft = TaskDraft;
    type Patch = TaskPatch;

    const STORAGE_KEY: &'static str = TASKS_KEY;

    fn id(&self) -> i64 {
        self.id
    }

    fn seed() -> Vec<Self> {
        seed_tasks()
    }

    fn create(draft: TaskDraft, id: i64, created_at: NaiveDate) -> Self {
        Task::from_draft(draft, id, created_at)
    }

    fn merge(&mut self, patch: TaskPatch) {
        self.apply(patch);
    }
}

impl<S: KeyValueStorage> RecordStore<Task, S> {
    /// Tasks whose `class_id` equals `class_id`, in insertion order.
    ///
    /// Works for class ids that no longer resolve to a class.
    pub fn list_by_class(&self, class_id: ClassId) -> Vec<&Task> {
        self.list()
            .iter()
            .filter(|task| task.class_id == class_id)
            .collect()
    }
}
