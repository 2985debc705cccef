//! Category domain model.

use super::{EntityId, UNSAVED_ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Named grouping for todos. Names are unique case-insensitively, which the
/// category service enforces before writing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Builds an unsaved, active category.
    pub fn new(name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: UNSAVED_ID,
            name: name.into(),
            description: None,
            is_active: true,
            created_at,
        }
    }

    /// Case-insensitive name comparison used for the uniqueness rule.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}
