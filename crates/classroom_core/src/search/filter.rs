//! Task filtering.

use crate::model::class::ClassId;
use crate::model::task::{Task, TaskStatus};
use chrono::NaiveDate;
use std::str::FromStr;

/// Sentinel string that disables a filter dimension.
pub const ALL_SENTINEL: &str = "all";

/// One filter dimension: either disabled or an exact value to match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Filter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }
}

impl<T: FromStr> Filter<T> {
    /// Parses a select-box value; `"all"` (any case, surrounding blanks
    /// ignored) disables the dimension. Other values are parsed verbatim.
    pub fn parse(value: &str) -> Result<Self, T::Err> {
        if value.trim().eq_ignore_ascii_case(ALL_SENTINEL) {
            return Ok(Self::All);
        }
        value.parse().map(Self::Only)
    }
}

/// Combined task filter. All active dimensions must match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskFilter {
    /// Case-insensitive substring over title, description and subject.
    /// Empty text matches everything.
    pub search: String,
    pub status: Filter<TaskStatus>,
    /// Exact subject match.
    pub subject: Filter<String>,
    pub class: Filter<ClassId>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        matches_search(task, &self.search)
            && self.status.matches(&task.status)
            && self.subject.matches(&task.subject)
            && self.class.matches(&task.class_id)
    }

    /// Matching tasks in input order.
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }
}

/// Case-insensitive substring match on title, description or subject.
pub fn matches_search(task: &Task, query: &str) -> bool {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [&task.title, &task.description, &task.subject]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Distinct subjects in first-seen order.
pub fn subjects(tasks: &[Task]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for task in tasks {
        if !seen.contains(&task.subject.as_str()) {
            seen.push(task.subject.as_str());
        }
    }
    seen
}

/// Stable ascending sort by due date.
pub fn sort_by_due_date<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Vec<&'a Task> {
    let mut sorted: Vec<&Task> = tasks.into_iter().collect();
    sorted.sort_by_key(|task| task.due_date);
    sorted
}

pub fn overdue_tasks(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    tasks.iter().filter(|task| task.is_overdue(today)).collect()
}

pub fn due_soon_tasks(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    tasks.iter().filter(|task| task.is_due_soon(today)).collect()
}

#[cfg(test)]
mod tests {
    use super::{
        due_soon_tasks, matches_search, overdue_tasks, sort_by_due_date, subjects, Filter,
        TaskFilter,
    };
    use crate::model::task::{seed_tasks, TaskStatus};
    use chrono::NaiveDate;

    #[test]
    fn search_is_case_insensitive_across_three_fields() {
        let tasks = seed_tasks();
        assert!(matches_search(&tasks[0], "SISTEMA SOLAR"));
        assert!(matches_search(&tasks[1], "matemática"));
        assert!(matches_search(&tasks[2], "português"));
        assert!(!matches_search(&tasks[2], "planetas"));
        assert!(matches_search(&tasks[2], ""));
    }

    #[test]
    fn filter_dimensions_are_anded() {
        let mut tasks = seed_tasks();
        tasks[1].status = TaskStatus::Completed;

        let filter = TaskFilter {
            search: "escrever".to_string(),
            class: Filter::Only(1),
            ..TaskFilter::default()
        };
        let ids: Vec<i64> = filter.apply(&tasks).iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![1]);

        let completed = TaskFilter {
            status: Filter::Only(TaskStatus::Completed),
            ..TaskFilter::default()
        };
        let ids: Vec<i64> = completed.apply(&tasks).iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![2]);

        let subject = TaskFilter {
            subject: Filter::Only("Português".to_string()),
            status: Filter::Only(TaskStatus::Pending),
            ..TaskFilter::default()
        };
        assert_eq!(subject.apply(&tasks).len(), 1);
    }

    #[test]
    fn filter_parse_honors_all_sentinel() {
        assert_eq!(Filter::<TaskStatus>::parse("ALL"), Ok(Filter::All));
        assert_eq!(
            Filter::<TaskStatus>::parse("completed"),
            Ok(Filter::Only(TaskStatus::Completed))
        );
        assert_eq!(Filter::<i64>::parse("2"), Ok(Filter::Only(2)));
        assert!(Filter::<i64>::parse("turma").is_err());
    }

    #[test]
    fn filter_parse_keeps_subject_text_verbatim() {
        assert_eq!(Filter::<String>::parse(" All "), Ok(Filter::All));
        assert_eq!(
            Filter::<String>::parse(" Artes "),
            Ok(Filter::Only(" Artes ".to_string()))
        );

        let mut tasks = seed_tasks();
        tasks[0].subject = " Artes ".to_string();
        let filter = TaskFilter {
            subject: Filter::<String>::parse(" Artes ").unwrap(),
            ..TaskFilter::default()
        };
        let ids: Vec<i64> = filter.apply(&tasks).iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn subjects_are_distinct_in_first_seen_order() {
        let mut tasks = seed_tasks();
        tasks.push(tasks[0].clone());
        assert_eq!(subjects(&tasks), vec!["Ciências", "Matemática", "Português"]);
    }

    #[test]
    fn due_date_sort_is_ascending() {
        let tasks = seed_tasks();
        let ids: Vec<i64> = sort_by_due_date(&tasks).iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn overdue_and_due_soon_views_skip_completed_tasks() {
        let mut tasks = seed_tasks();
        tasks[1].status = TaskStatus::Completed;
        let today = NaiveDate::from_ymd_opt(2023, 12, 16).unwrap();

        let overdue: Vec<i64> = overdue_tasks(&tasks, today).iter().map(|t| t.id).collect();
        assert_eq!(overdue, vec![1]);
        let soon: Vec<i64> = due_soon_tasks(&tasks, today).iter().map(|t| t.id).collect();
        assert_eq!(soon, vec![3]);
    }
}
