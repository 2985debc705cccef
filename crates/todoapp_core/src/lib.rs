//! Core domain logic for the todo application.
//! This crate is the single source of truth for business invariants:
//! storage schema, repositories, services, DTOs and logging.

pub mod db;
pub mod dto;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, LogConfig};
pub use model::category::Category;
pub use model::todo::{Priority, Todo, DEFAULT_CATEGORY_ID};
pub use model::todo_note::TodoNote;
pub use model::EntityId;
pub use repo::{RepoError, RepoResult, Repository};
pub use service::{
    CategoryService, ServiceError, ServiceResult, Services, TodoNoteService, TodoService,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
