//! HTTP error type rendered as RFC 9457 problem details.
//!
//! # Invariants
//! - Every error response is `application/problem+json`.
//! - Server faults are logged with their cause; the response only carries
//!   a generic detail.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use todoapp_core::dto::ValidationError;
use todoapp_core::{DbError, ServiceError};

pub const PROBLEM_JSON: &str = "application/problem+json";
const INTERNAL_DETAIL: &str = "An unexpected error occurred.";

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Validation(ValidationError),
    /// Malformed request (unparseable body, path or query).
    BadRequest(String),
    Conflict(String),
    /// Unexpected fault; the message is logged, never returned.
    Internal(String),
}

impl ApiError {
    pub fn not_found(entity: &str, id: i64) -> Self {
        Self::NotFound(format!("{entity} with id {id} was not found"))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn problem(&self) -> ProblemDetails {
        let status = self.status_code();
        let (problem_type, title) = match status {
            StatusCode::NOT_FOUND => (
                "https://tools.ietf.org/html/rfc9110#section-15.5.5",
                "Not Found",
            ),
            StatusCode::BAD_REQUEST => (
                "https://tools.ietf.org/html/rfc9110#section-15.5.1",
                "One or more validation errors occurred.",
            ),
            StatusCode::CONFLICT => (
                "https://tools.ietf.org/html/rfc9110#section-15.5.10",
                "Conflict",
            ),
            _ => (
                "https://tools.ietf.org/html/rfc9110#section-15.6.1",
                "An error occurred while processing your request.",
            ),
        };

        let (detail, errors) = match self {
            Self::NotFound(message) | Self::BadRequest(message) | Self::Conflict(message) => {
                (Some(message.clone()), None)
            }
            Self::Validation(validation) => (None, Some(validation.by_field())),
            Self::Internal(_) => (Some(INTERNAL_DETAIL.to_string()), None),
        };

        ProblemDetails {
            problem_type,
            title,
            status: status.as_u16(),
            detail,
            errors,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(message)
            | Self::BadRequest(message)
            | Self::Conflict(message)
            | Self::Internal(message) => write!(f, "{message}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ApiError {}

/// Problem details body.
#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: &'static str,
    pub title: &'static str,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<&'static str, Vec<String>>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(cause) = &self {
            error!("event=http_error module=http status=error error={cause}");
        }
        let status = self.status_code();
        let mut response = (status, Json(self.problem())).into_response();
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(PROBLEM_JSON));
        response
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::NotFound { entity, id } => {
                Self::NotFound(format!("{entity} row with id {id} was not found"))
            }
            ServiceError::Validation(validation) => Self::Validation(validation),
            ServiceError::Conflict(message) => Self::Conflict(message),
            ServiceError::ReferentialConstraint(_) => Self::Conflict(
                "The resource is still referenced by other records.".to_string(),
            ),
            ServiceError::Repo(err) => Self::Internal(err.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for ApiError {
    fn from(value: DbError) -> Self {
        Self::Internal(value.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Internal(format!("blocking task failed: {value}"))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}
