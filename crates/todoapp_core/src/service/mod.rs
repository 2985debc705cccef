//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Validate request DTOs, apply defaults and stamp timestamps.
//! - Keep HTTP layers decoupled from storage details.
//!
//! # Invariants
//! - Absent rows surface as `None`/`false` from lookups and deletes; only
//!   parent lookups on writes raise `ServiceError::NotFound`.

pub mod category_service;
pub mod todo_note_service;
pub mod todo_service;

use crate::dto::validation::ValidationError;
use crate::model::EntityId;
use crate::repo::{
    RepoError, SqliteCategoryRepository, SqliteTodoNoteRepository, SqliteTodoRepository,
};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use category_service::CategoryService;
pub use todo_note_service::TodoNoteService;
pub use todo_service::TodoService;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for todo/category/note use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// A referenced parent row does not exist.
    NotFound { entity: &'static str, id: EntityId },
    /// Request DTO failed one or more field rules.
    Validation(ValidationError),
    /// Uniqueness rule violated (duplicate category name).
    Conflict(String),
    /// Write blocked by dependent rows.
    ReferentialConstraint(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Conflict(message) => write!(f, "conflict: {message}"),
            Self::ReferentialConstraint(message) => write!(f, "{message}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { table, id } => Self::NotFound { entity: table, id },
            RepoError::ReferentialConstraint(message) => Self::ReferentialConstraint(message),
            other => Self::Repo(other),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Services bound to one connection; built once per unit of work.
pub struct Services<'conn> {
    pub categories: CategoryService<SqliteCategoryRepository<'conn>>,
    pub todos: TodoService<
        SqliteTodoRepository<'conn>,
        SqliteCategoryRepository<'conn>,
        SqliteTodoNoteRepository<'conn>,
    >,
    pub notes: TodoNoteService<SqliteTodoNoteRepository<'conn>, SqliteTodoRepository<'conn>>,
}

impl<'conn> Services<'conn> {
    /// Wires every service to `conn`, which must be opened through `db::open_db`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            categories: CategoryService::new(SqliteCategoryRepository::new(conn)),
            todos: TodoService::new(
                SqliteTodoRepository::new(conn),
                SqliteCategoryRepository::new(conn),
                SqliteTodoNoteRepository::new(conn),
            ),
            notes: TodoNoteService::new(
                SqliteTodoNoteRepository::new(conn),
                SqliteTodoRepository::new(conn),
            ),
        }
    }
}
