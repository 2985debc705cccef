//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the generic CRUD contract and per-entity query contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repositories never validate business rules; services do.
//! - Repository APIs return semantic errors (`NotFound`,
//!   `ReferentialConstraint`) in addition to DB transport errors.

pub mod base_repo;
pub mod category_repo;
pub mod todo_note_repo;
pub mod todo_repo;

pub use base_repo::{Entity, RepoError, RepoResult, Repository, SqliteRepository};
pub use category_repo::{CategoryRepository, SqliteCategoryRepository};
pub use todo_note_repo::{SqliteTodoNoteRepository, TodoNoteRepository};
pub use todo_repo::{SqliteTodoRepository, TodoListQuery, TodoRecord, TodoRepository, TodoSort};
