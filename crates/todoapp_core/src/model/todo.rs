//! Todo domain model.
//!
//! # Invariants
//! - `priority` is always one of the three `Priority` levels.
//! - `updated_at` stays `None` until the first update.
//! - `category_id` always references an existing category row.

use super::{EntityId, UNSAVED_ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Category assigned when a create request does not name one.
pub const DEFAULT_CATEGORY_ID: EntityId = 1;

/// Todo urgency level. Persisted and serialized as `1..=3`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "i64")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_i64(self) -> i64 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

/// Raised when an integer is outside the `1..=3` priority range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidPriority(pub i64);

impl Display for InvalidPriority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "priority must be between 1 and 3, got {}", self.0)
    }
}

impl Error for InvalidPriority {}

impl TryFrom<i64> for Priority {
    type Error = InvalidPriority;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Low),
            2 => Ok(Self::Medium),
            3 => Ok(Self::High),
            other => Err(InvalidPriority(other)),
        }
    }
}

impl From<Priority> for i64 {
    fn from(value: Priority) -> Self {
        value.as_i64()
    }
}

/// Task record with completion state, priority, optional due date and
/// category association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Priority,
    pub category_id: EntityId,
}

impl Todo {
    /// Builds an unsaved, pending todo stamped with `created_at`.
    pub fn new(title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: UNSAVED_ID,
            title: title.into(),
            description: String::new(),
            is_completed: false,
            created_at,
            updated_at: None,
            due_date: None,
            priority: Priority::default(),
            category_id: DEFAULT_CATEGORY_ID,
        }
    }

    /// Flips the completion flag and stamps `updated_at`.
    pub fn set_completed(&mut self, completed: bool, now: DateTime<Utc>) {
        self.is_completed = completed;
        self.updated_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::{Priority, Todo};
    use chrono::{Duration, Utc};

    #[test]
    fn priority_round_trips_through_integer() {
        for level in [Priority::Low, Priority::Medium, Priority::High] {
            assert_eq!(Priority::try_from(level.as_i64()), Ok(level));
        }
        assert!(Priority::try_from(0).is_err());
        assert!(Priority::try_from(4).is_err());
    }

    #[test]
    fn set_completed_stamps_updated_at() {
        let created_at = Utc::now();
        let mut todo = Todo::new("pay rent", created_at);
        assert_eq!(todo.updated_at, None);

        let later = created_at + Duration::minutes(5);
        todo.set_completed(true, later);
        assert!(todo.is_completed);
        assert_eq!(todo.updated_at, Some(later));
    }
}
