//! Task (assignment) records.
//!
//! # Invariants
//! - `status` is always `pending` or `completed`.
//! - `class_id` may point at a class that no longer exists.

use super::class::{seed_date, ClassId};
use super::validation::{require_text, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub type TaskId = i64;

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    /// Returns the opposite status.
    pub fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Completed,
            Self::Completed => Self::Pending,
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            other => Err(format!(
                "unsupported task status `{other}`; expected pending|completed"
            )),
        }
    }
}

/// One persisted task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub subject: String,
    pub due_date: NaiveDate,
    pub created_at: NaiveDate,
    pub status: TaskStatus,
    pub class_id: ClassId,
}

impl Task {
    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }

    /// Pending and due strictly before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_pending() && self.due_date < today
    }

    /// Pending and due within the next three days, today included.
    pub fn is_due_soon(&self, today: NaiveDate) -> bool {
        let days_left = (self.due_date - today).num_days();
        self.is_pending() && (0..=DUE_SOON_DAYS).contains(&days_left)
    }

    pub(crate) fn from_draft(draft: TaskDraft, id: TaskId, created_at: NaiveDate) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            subject: draft.subject,
            due_date: draft.due_date,
            created_at,
            status: draft.status,
            class_id: draft.class_id,
        }
    }

    pub(crate) fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(subject) = patch.subject {
            self.subject = subject;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(class_id) = patch.class_id {
            self.class_id = class_id;
        }
    }
}

const DUE_SOON_DAYS: i64 = 3;

/// Input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub subject: String,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub status: TaskStatus,
    pub class_id: ClassId,
}

impl TaskDraft {
    /// Checks the required text fields of the task form.
    ///
    /// `due_date` is always present by construction.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        require_text("subject", &self.subject)
    }
}

/// Partial update for a task. `None` leaves the field untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subject: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<TaskStatus>,
    pub class_id: Option<ClassId>,
}

impl TaskPatch {
    /// Rejects present-but-blank text fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("subject", &self.subject),
        ] {
            if let Some(value) = value {
                require_text(field, value)?;
            }
        }
        Ok(())
    }

    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Seed tasks referencing the two seed classes.
pub fn seed_tasks() -> Vec<Task> {
    vec![
        Task {
            id: 1,
            title: "Relatório de Ciências".to_string(),
            description: "Escrever um relatório sobre o sistema solar e seus planetas"
                .to_string(),
            subject: "Ciências".to_string(),
            due_date: seed_date(2023, 12, 15),
            created_at: seed_date(2023, 11, 25),
            status: TaskStatus::Pending,
            class_id: 1,
        },
        Task {
            id: 2,
            title: "Exercícios de Matemática".to_string(),
            description: "Resolver os exercícios da página 32 do livro".to_string(),
            subject: "Matemática".to_string(),
            due_date: seed_date(2023, 12, 10),
            created_at: seed_date(2023, 11, 28),
            status: TaskStatus::Pending,
            class_id: 1,
        },
        Task {
            id: 3,
            title: "Redação sobre Meio Ambiente".to_string(),
            description: "Escrever uma redação de 30 linhas sobre preservação ambiental"
                .to_string(),
            subject: "Português".to_string(),
            due_date: seed_date(2023, 12, 18),
            created_at: seed_date(2023, 11, 30),
            status: TaskStatus::Pending,
            class_id: 2,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::{seed_tasks, Task, TaskStatus};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task_due(due: NaiveDate, status: TaskStatus) -> Task {
        let mut task = seed_tasks().remove(0);
        task.due_date = due;
        task.status = status;
        task
    }

    #[test]
    fn json_shape_matches_persisted_blobs() {
        let json = serde_json::to_value(&seed_tasks()[2]).unwrap();
        assert_eq!(json["dueDate"], "2023-12-18");
        assert_eq!(json["createdAt"], "2023-11-30");
        assert_eq!(json["classId"], 2);
        assert_eq!(json["status"], "pending");
    }

    #[test]
    fn unknown_status_is_rejected_on_decode() {
        let mut json = serde_json::to_value(&seed_tasks()[0]).unwrap();
        json["status"] = "archived".into();
        assert!(serde_json::from_value::<Task>(json).is_err());
    }

    #[test]
    fn overdue_requires_pending_and_past_due() {
        let today = date(2024, 3, 10);
        assert!(task_due(date(2024, 3, 9), TaskStatus::Pending).is_overdue(today));
        assert!(!task_due(date(2024, 3, 10), TaskStatus::Pending).is_overdue(today));
        assert!(!task_due(date(2024, 3, 1), TaskStatus::Completed).is_overdue(today));
    }

    #[test]
    fn due_soon_covers_today_through_three_days() {
        let today = date(2024, 3, 10);
        assert!(task_due(date(2024, 3, 10), TaskStatus::Pending).is_due_soon(today));
        assert!(task_due(date(2024, 3, 13), TaskStatus::Pending).is_due_soon(today));
        assert!(!task_due(date(2024, 3, 14), TaskStatus::Pending).is_due_soon(today));
        assert!(!task_due(date(2024, 3, 9), TaskStatus::Pending).is_due_soon(today));
        assert!(!task_due(date(2024, 3, 11), TaskStatus::Completed).is_due_soon(today));
    }

    #[test]
    fn status_parses_filter_strings_and_toggles() {
        assert_eq!(" Completed ".parse::<TaskStatus>(), Ok(TaskStatus::Completed));
        assert!("all".parse::<TaskStatus>().is_err());
        assert_eq!(TaskStatus::Pending.toggled(), TaskStatus::Completed);
    }
}
