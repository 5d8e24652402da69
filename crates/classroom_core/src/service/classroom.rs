//! Application composition root and form-level use cases.
//!
//! # Responsibility
//! - Own one shared storage handle and the stores built on it.
//! - Gate writes on a signed-in teacher and validate form input.
//! - Resolve display labels for possibly dangling class references.
//!
//! # Invariants
//! - Class deletion never cascades to tasks.
//! - Creating a task requires at least one existing class.

use super::auth_service::AuthService;
use super::dashboard::DashboardSummary;
use crate::clock::Clock;
use crate::model::class::{Class, ClassDraft, ClassId, ClassPatch};
use crate::model::task::{Task, TaskDraft, TaskId, TaskPatch, TaskStatus};
use crate::model::validation::ValidationError;
use crate::repo::class_repo::ClassStore;
use crate::repo::ids::{IdGenerator, TimestampIds};
use crate::repo::task_repo::TaskStore;
use crate::repo::StoreError;
use crate::search::filter::TaskFilter;
use crate::storage::KeyValueStorage;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Label shown for a task whose class no longer exists.
pub const MISSING_CLASS_LABEL: &str = "N/A";

pub type ClassroomResult<T> = Result<T, ClassroomError>;

#[derive(Debug)]
pub enum ClassroomError {
    /// Write attempted without a signed-in teacher.
    NotAuthorized,
    Validation(ValidationError),
    /// A task cannot be created before any class exists.
    NoClasses,
    TaskNotFound(TaskId),
    Store(StoreError),
}

impl Display for ClassroomError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAuthorized => write!(f, "a signed-in teacher is required"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::NoClasses => write!(f, "create at least one class before adding tasks"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ClassroomError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ClassroomError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ClassroomError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Explicitly constructed application state.
pub struct Classroom<S: KeyValueStorage> {
    clock: Rc<dyn Clock>,
    classes: ClassStore<Rc<S>>,
    tasks: TaskStore<Rc<S>>,
    auth: AuthService<Rc<S>>,
}

impl<S: KeyValueStorage> Classroom<S> {
    /// Loads classes, tasks and the persisted session from `storage`.
    ///
    /// Ids are clock-derived milliseconds, as in the browser build.
    pub fn open(storage: S, clock: Rc<dyn Clock>) -> Self {
        let class_ids = Box::new(TimestampIds::new(Rc::clone(&clock)));
        let task_ids = Box::new(TimestampIds::new(Rc::clone(&clock)));
        Self::open_with_ids(storage, clock, class_ids, task_ids)
    }

    /// Same as [`Self::open`] with caller-supplied id generators.
    pub fn open_with_ids(
        storage: S,
        clock: Rc<dyn Clock>,
        class_ids: Box<dyn IdGenerator>,
        task_ids: Box<dyn IdGenerator>,
    ) -> Self {
        let storage = Rc::new(storage);
        let classes = ClassStore::open(Rc::clone(&storage), class_ids, Rc::clone(&clock));
        let tasks = TaskStore::open(Rc::clone(&storage), task_ids, Rc::clone(&clock));
        let mut auth = AuthService::new(storage);
        auth.restore();

        info!(
            "event=classroom_open module=service status=ok classes={} tasks={} signed_in={}",
            classes.len(),
            tasks.len(),
            auth.is_authenticated()
        );
        Self {
            clock,
            classes,
            tasks,
            auth,
        }
    }

    pub fn classes(&self) -> &ClassStore<Rc<S>> {
        &self.classes
    }

    /// Direct store access, bypassing the teacher gate and validation.
    pub fn classes_mut(&mut self) -> &mut ClassStore<Rc<S>> {
        &mut self.classes
    }

    pub fn tasks(&self) -> &TaskStore<Rc<S>> {
        &self.tasks
    }

    /// Direct store access, bypassing the teacher gate and validation.
    pub fn tasks_mut(&mut self) -> &mut TaskStore<Rc<S>> {
        &mut self.tasks
    }

    pub fn auth(&self) -> &AuthService<Rc<S>> {
        &self.auth
    }

    pub fn auth_mut(&mut self) -> &mut AuthService<Rc<S>> {
        &mut self.auth
    }

    pub fn create_class(&mut self, draft: ClassDraft) -> ClassroomResult<Class> {
        self.require_teacher()?;
        draft.validate()?;
        Ok(self.classes.add(draft)?)
    }

    pub fn update_class(&mut self, id: ClassId, patch: ClassPatch) -> ClassroomResult<()> {
        self.require_teacher()?;
        patch.validate()?;
        Ok(self.classes.update(id, patch)?)
    }

    /// Removes the class; its tasks keep the dangling `class_id`.
    pub fn delete_class(&mut self, id: ClassId) -> ClassroomResult<()> {
        self.require_teacher()?;
        Ok(self.classes.delete(id)?)
    }

    /// Validates and adds a task.
    ///
    /// The referenced class is not checked; only that some class exists.
    pub fn create_task(&mut self, draft: TaskDraft) -> ClassroomResult<Task> {
        self.require_teacher()?;
        if self.classes.is_empty() {
            return Err(ClassroomError::NoClasses);
        }
        draft.validate()?;
        Ok(self.tasks.add(draft)?)
    }

    pub fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> ClassroomResult<()> {
        self.require_teacher()?;
        patch.validate()?;
        Ok(self.tasks.update(id, patch)?)
    }

    pub fn delete_task(&mut self, id: TaskId) -> ClassroomResult<()> {
        self.require_teacher()?;
        Ok(self.tasks.delete(id)?)
    }

    /// Flips pending/completed and returns the new status.
    ///
    /// Open to any caller, like the status button on the task detail view.
    pub fn toggle_task_status(&mut self, id: TaskId) -> ClassroomResult<TaskStatus> {
        let status = self
            .tasks
            .get_by_id(id)
            .map(|task| task.status.toggled())
            .ok_or(ClassroomError::TaskNotFound(id))?;
        self.tasks.update(id, TaskPatch::status(status))?;
        Ok(status)
    }

    /// Class name for display, or `"N/A"` when the id does not resolve.
    pub fn class_label(&self, class_id: ClassId) -> &str {
        self.classes
            .get_by_id(class_id)
            .map_or(MISSING_CLASS_LABEL, |class| class.name.as_str())
    }

    pub fn filtered_tasks(&self, filter: &TaskFilter) -> Vec<&Task> {
        filter.apply(self.tasks.list())
    }

    pub fn dashboard(&self) -> DashboardSummary {
        DashboardSummary::from_tasks(self.tasks.list(), self.clock.today())
    }

    fn require_teacher(&self) -> ClassroomResult<()> {
        if self.auth.is_teacher() {
            Ok(())
        } else {
            Err(ClassroomError::NotAuthorized)
        }
    }
}
