//! Todo note transfer objects.

use super::validation::{ValidationError, Validator};
use crate::model::todo_note::TodoNote;
use crate::model::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const NOTE_CONTENT_MAX_CHARS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoNoteDto {
    pub id: EntityId,
    pub todo_id: EntityId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<TodoNote> for TodoNoteDto {
    fn from(value: TodoNote) -> Self {
        Self {
            id: value.id,
            todo_id: value.todo_id,
            content: value.content,
            created_at: value.created_at,
        }
    }
}

/// Body of note create and update requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoNoteRequest {
    pub content: String,
}

impl TodoNoteRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_note_content(&self.content)
    }
}

pub(crate) fn validate_note_content(content: &str) -> Result<(), ValidationError> {
    Validator::new()
        .required("content", content)
        .max_chars("content", content, NOTE_CONTENT_MAX_CHARS)
        .finish()
}
