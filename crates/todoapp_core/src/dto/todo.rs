//! Todo transfer objects, list filters and request validation.
//!
//! # Invariants
//! - `priority` travels as an integer and is range-checked by `validate`.
//! - A due date, when present, must be later than the validation instant.

use super::validation::{ValidationError, Validator};
use crate::model::todo::{Priority, Todo};
use crate::model::EntityId;
use crate::repo::todo_repo::{TodoRecord, TodoSort};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const TODO_TITLE_MAX_CHARS: usize = 200;
pub const TODO_DESCRIPTION_MAX_CHARS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoDto {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: i64,
    pub category_id: EntityId,
    /// Present only when relations were requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}

impl TodoDto {
    /// Maps a joined record, keeping the category name only when requested.
    pub fn from_record(record: TodoRecord, include_relations: bool) -> Self {
        let mut dto = Self::from(record.todo);
        if include_relations {
            dto.category_name = record.category_name;
        }
        dto
    }
}

impl From<Todo> for TodoDto {
    fn from(value: Todo) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            is_completed: value.is_completed,
            created_at: value.created_at,
            updated_at: value.updated_at,
            due_date: value.due_date,
            priority: value.priority.as_i64(),
            category_id: value.category_id,
            category_name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default = "default_priority")]
    pub priority: i64,
    /// Falls back to the default category when absent.
    #[serde(default)]
    pub category_id: Option<EntityId>,
    /// Content of a note created together with the todo.
    #[serde(default)]
    pub initial_note: Option<String>,
}

impl CreateTodoRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            due_date: None,
            priority: default_priority(),
            category_id: None,
            initial_note: None,
        }
    }

    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), ValidationError> {
        let mut validator = Validator::new();
        validate_common(
            &mut validator,
            &self.title,
            &self.description,
            self.priority,
            self.due_date.as_ref(),
            now,
        );
        validator.positive_id("categoryId", self.category_id);
        if let Some(note) = self.initial_note.as_deref() {
            validator.max_chars("initialNote", note, super::todo_note::NOTE_CONTENT_MAX_CHARS);
        }
        validator.finish()
    }
}

/// Full replacement of the mutable todo fields; `category_id` is kept when
/// absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default = "default_priority")]
    pub priority: i64,
    #[serde(default)]
    pub category_id: Option<EntityId>,
}

impl UpdateTodoRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            is_completed: false,
            due_date: None,
            priority: default_priority(),
            category_id: None,
        }
    }

    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), ValidationError> {
        let mut validator = Validator::new();
        validate_common(
            &mut validator,
            &self.title,
            &self.description,
            self.priority,
            self.due_date.as_ref(),
            now,
        );
        validator.positive_id("categoryId", self.category_id);
        validator.finish()
    }
}

/// Query options of the filtered todo listing
/// (`?categoryId=&done=&sort=&include=`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoFilter {
    #[serde(default)]
    pub category_id: Option<EntityId>,
    #[serde(default)]
    pub done: Option<bool>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub include: bool,
}

impl TodoFilter {
    /// `priority` sorts high first, `dueDate` sorts earliest first with
    /// undated todos last; anything else sorts newest first.
    pub fn sort_order(&self) -> TodoSort {
        match self
            .sort
            .as_deref()
            .map(|value| value.trim().to_ascii_lowercase())
            .as_deref()
        {
            Some("priority") => TodoSort::PriorityDesc,
            Some("duedate" | "due" | "due_date") => TodoSort::DueDateAsc,
            _ => TodoSort::CreatedAtDesc,
        }
    }
}

/// Checks a priority path/query parameter and converts it.
pub fn parse_priority(value: i64) -> Result<Priority, ValidationError> {
    Priority::try_from(value).map_err(|err| ValidationError::single("priority", err.to_string()))
}

fn validate_common(
    validator: &mut Validator,
    title: &str,
    description: &str,
    priority: i64,
    due_date: Option<&DateTime<Utc>>,
    now: DateTime<Utc>,
) {
    validator
        .required("title", title)
        .max_chars("title", title.trim(), TODO_TITLE_MAX_CHARS)
        .max_chars("description", description, TODO_DESCRIPTION_MAX_CHARS)
        .range("priority", priority, 1, 3)
        .future("dueDate", due_date, now);
}

fn default_priority() -> i64 {
    Priority::default().as_i64()
}
