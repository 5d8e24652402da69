//! Dashboard statistics derived from the task collection.

use crate::model::task::{Task, TaskStatus};
use crate::search::filter::sort_by_due_date;
use chrono::NaiveDate;

/// Aggregated counters for the dashboard cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    pub overdue: usize,
    pub due_soon: usize,
    /// Pending task with the earliest due date; first inserted wins ties.
    pub next_due: Option<Task>,
    /// Whether some pending task is due exactly `today`.
    pub has_due_today: bool,
}

impl DashboardSummary {
    pub fn from_tasks(tasks: &[Task], today: NaiveDate) -> Self {
        let pending = tasks.iter().filter(|task| task.is_pending()).count();
        let completed = tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Completed)
            .count();
        let next_due = sort_by_due_date(tasks.iter().filter(|task| task.is_pending()))
            .first()
            .map(|task| (*task).clone());

        Self {
            total: tasks.len(),
            pending,
            completed,
            overdue: tasks.iter().filter(|task| task.is_overdue(today)).count(),
            due_soon: tasks.iter().filter(|task| task.is_due_soon(today)).count(),
            next_due,
            has_due_today: tasks
                .iter()
                .any(|task| task.is_pending() && task.due_date == today),
        }
    }
}
