//! Transfer objects exchanged with API callers.
//!
//! # Responsibility
//! - Define request/response shapes (camelCase on the wire).
//! - Own request validation and entity-to-DTO mapping.
//!
//! # Invariants
//! - Request DTOs are validated by services before any repository write.

pub mod category;
pub mod paging;
pub mod todo;
pub mod todo_note;
pub mod validation;

pub use category::{CategoryDto, CategoryStats, CreateCategoryRequest, UpdateCategoryRequest};
pub use paging::{Page, PageRequest, PagedResult, MAX_PAGE_SIZE};
pub use todo::{parse_priority, CreateTodoRequest, TodoDto, TodoFilter, UpdateTodoRequest};
pub use todo_note::{TodoNoteDto, TodoNoteRequest};
pub use validation::{FieldError, ValidationError};
