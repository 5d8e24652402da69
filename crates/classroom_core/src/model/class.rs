//! Class (school group) records.

use super::validation::{require_text, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of a class. Tasks reference it through `Task::class_id`.
pub type ClassId = i64;

/// One persisted class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: ClassId,
    pub name: String,
    pub description: String,
    /// Date-only, set once at creation.
    pub created_at: NaiveDate,
}

/// Input for creating a class.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassDraft {
    pub name: String,
    pub description: String,
}

impl ClassDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Checks the required fields of the class form.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("description", &self.description)
    }
}

/// Partial update for a class. `None` leaves the field untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ClassPatch {
    /// Rejects present-but-blank fields; absent fields are fine.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(description) = &self.description {
            require_text("description", description)?;
        }
        Ok(())
    }
}

impl Class {
    pub(crate) fn from_draft(draft: ClassDraft, id: ClassId, created_at: NaiveDate) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            created_at,
        }
    }

    pub(crate) fn apply(&mut self, patch: ClassPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }
}

/// Seed classes used when nothing valid is persisted yet.
pub fn seed_classes() -> Vec<Class> {
    vec![
        Class {
            id: 1,
            name: "3º Ano A".to_string(),
            description: "Turma do ensino médio".to_string(),
            created_at: seed_date(2023, 11, 20),
        },
        Class {
            id: 2,
            name: "7º Ano B".to_string(),
            description: "Turma do ensino fundamental".to_string(),
            created_at: seed_date(2023, 11, 22),
        },
    ]
}

pub(crate) fn seed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{seed_classes, Class, ClassDraft, ClassPatch};
    use crate::model::validation::ValidationError;

    #[test]
    fn serializes_with_camel_case_and_plain_dates() {
        let class = &seed_classes()[0];
        let json = serde_json::to_value(class).unwrap();
        assert_eq!(json["createdAt"], "2023-11-20");
        assert_eq!(json["name"], "3º Ano A");

        let back: Class = serde_json::from_value(json).unwrap();
        assert_eq!(&back, class);
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let mut class = seed_classes().remove(1);
        class.apply(ClassPatch {
            description: Some("Turma da tarde".to_string()),
            ..ClassPatch::default()
        });
        assert_eq!(class.name, "7º Ano B");
        assert_eq!(class.description, "Turma da tarde");
    }

    #[test]
    fn draft_validation_rejects_blank_fields() {
        assert_eq!(
            ClassDraft::new("  ", "d").validate(),
            Err(ValidationError::BlankField("name"))
        );
        assert_eq!(
            ClassDraft::new("Turma X", "\n").validate(),
            Err(ValidationError::BlankField("description"))
        );
        assert!(ClassDraft::new("Turma X", "d").validate().is_ok());
    }
}
