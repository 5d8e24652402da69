//! Core data layer for the classroom task tracker.
//! Stores here are the only write path to persisted classes and tasks.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod storage;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::class::{Class, ClassDraft, ClassId, ClassPatch};
pub use model::task::{Task, TaskDraft, TaskId, TaskPatch, TaskStatus};
pub use model::user::{User, UserRole};
pub use model::validation::ValidationError;
pub use repo::class_repo::ClassStore;
pub use repo::ids::{IdGenerator, SequentialIds, TimestampIds};
pub use repo::record_store::{
    ChangeKind, LoadSource, Record, RecordStore, StoreChange, SubscriptionId,
};
pub use repo::task_repo::TaskStore;
pub use repo::{StoreError, StoreResult};
pub use search::filter::{Filter, TaskFilter};
pub use service::auth_service::{AuthError, AuthResult, AuthService};
pub use service::classroom::{Classroom, ClassroomError, ClassroomResult, MISSING_CLASS_LABEL};
pub use service::dashboard::DashboardSummary;
pub use storage::{KeyValueStorage, MemoryStorage, SqliteStorage, StorageError, StorageResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
