//! Category transfer objects and request validation.

use super::validation::{ValidationError, Validator};
use crate::model::category::Category;
use crate::model::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const CATEGORY_NAME_MAX_CHARS: usize = 100;
pub const CATEGORY_DESCRIPTION_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            is_active: value.is_active,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl CreateCategoryRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            is_active: true,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.name, self.description.as_deref())
    }
}

/// Full replacement of the mutable category fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl UpdateCategoryRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.name, self.description.as_deref())
    }
}

/// Active/inactive breakdown over all categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub total_categories: u64,
    pub active_categories: u64,
    pub inactive_categories: u64,
}

fn validate_fields(name: &str, description: Option<&str>) -> Result<(), ValidationError> {
    Validator::new()
        .required("name", name)
        .max_chars("name", name.trim(), CATEGORY_NAME_MAX_CHARS)
        .max_chars(
            "description",
            description.unwrap_or_default(),
            CATEGORY_DESCRIPTION_MAX_CHARS,
        )
        .finish()
}

fn default_active() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::{CreateCategoryRequest, CATEGORY_NAME_MAX_CHARS};

    #[test]
    fn create_request_defaults_to_active() {
        let request: CreateCategoryRequest =
            serde_json::from_str(r#"{"name":"Work"}"#).expect("valid json");
        assert!(request.is_active);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn create_request_rejects_blank_and_long_names() {
        assert!(CreateCategoryRequest::new("   ")
            .validate()
            .expect_err("blank")
            .has_field("name"));
        assert!(CreateCategoryRequest::new("x".repeat(CATEGORY_NAME_MAX_CHARS + 1))
            .validate()
            .is_err());
    }
}
