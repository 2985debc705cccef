//! TodoNote domain model.

use super::{EntityId, UNSAVED_ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-text annotation owned by one todo. Removed together with its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoNote {
    pub id: EntityId,
    pub todo_id: EntityId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl TodoNote {
    pub fn new(todo_id: EntityId, content: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: UNSAVED_ID,
            todo_id,
            content: content.into(),
            created_at,
        }
    }
}
