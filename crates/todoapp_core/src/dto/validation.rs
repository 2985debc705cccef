//! Request validation errors and the field checks shared by request DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One failed rule on one request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Wire (camelCase) field name.
    pub field: &'static str,
    pub message: String,
}

/// All rule failures of one request, in check order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                field,
                message: message.into(),
            }],
        }
    }

    /// True when `field` has at least one failure.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }

    /// Messages grouped by field, for problem-details `errors` maps.
    pub fn by_field(&self) -> BTreeMap<&'static str, Vec<String>> {
        let mut grouped: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
        for error in &self.errors {
            grouped
                .entry(error.field)
                .or_default()
                .push(error.message.clone());
        }
        grouped
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let fields = self
            .errors
            .iter()
            .map(|error| format!("{}: {}", error.field, error.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "validation failed: {fields}")
    }
}

impl Error for ValidationError {}

/// Collects rule failures for one request.
#[derive(Debug, Default)]
pub(crate) struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn fail(&mut self, field: &'static str, message: String) {
        self.errors.push(FieldError { field, message });
    }

    pub(crate) fn required(&mut self, field: &'static str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.fail(field, format!("{field} is required"));
        }
        self
    }

    /// Counts Unicode scalar values, not bytes.
    pub(crate) fn max_chars(&mut self, field: &'static str, value: &str, max: usize) -> &mut Self {
        if value.chars().count() > max {
            self.fail(field, format!("{field} must be at most {max} characters"));
        }
        self
    }

    pub(crate) fn range(&mut self, field: &'static str, value: i64, min: i64, max: i64) -> &mut Self {
        if value < min || value > max {
            self.fail(field, format!("{field} must be between {min} and {max}"));
        }
        self
    }

    pub(crate) fn positive_id(&mut self, field: &'static str, value: Option<i64>) -> &mut Self {
        if value.is_some_and(|id| id <= 0) {
            self.fail(field, format!("{field} must be a positive id"));
        }
        self
    }

    pub(crate) fn future(
        &mut self,
        field: &'static str,
        value: Option<&DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> &mut Self {
        if value.is_some_and(|timestamp| *timestamp <= now) {
            self.fail(field, format!("{field} must be in the future"));
        }
        self
    }

    pub(crate) fn finish(&mut self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            return Ok(());
        }
        Err(ValidationError {
            errors: std::mem::take(&mut self.errors),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ValidationError, Validator};
    use chrono::{Duration, Utc};

    #[test]
    fn validator_collects_every_failure_in_order() {
        let now = Utc::now();
        let past = now - Duration::minutes(1);
        let error = Validator::new()
            .required("title", "  ")
            .max_chars("title", "abc", 2)
            .range("priority", 4, 1, 3)
            .future("dueDate", Some(&past), now)
            .finish()
            .expect_err("all rules should fail");

        let fields = error.errors.iter().map(|e| e.field).collect::<Vec<_>>();
        assert_eq!(fields, vec!["title", "title", "priority", "dueDate"]);
        assert_eq!(error.by_field()["title"].len(), 2);
    }

    #[test]
    fn max_chars_counts_characters_not_bytes() {
        assert!(Validator::new()
            .max_chars("name", "çğüşöı", 6)
            .finish()
            .is_ok());
    }

    #[test]
    fn display_lists_fields() {
        let error = ValidationError::single("name", "name is required");
        assert_eq!(error.to_string(), "validation failed: name: name is required");
    }
}
