//! Todo use-case service.
//!
//! # Responsibility
//! - Validate todo requests and apply creation defaults.
//! - Expose the status, priority, category and overdue listings.
//! - Map joined records into `TodoDto`, optionally with the category name.
//!
//! # Invariants
//! - New todos start pending with `updated_at == None`.
//! - Every write checks that the target category exists; a dangling
//!   `categoryId` is a validation failure, not a storage error.
//! - Status toggles stamp `updated_at` without re-validating other fields,
//!   so a todo whose due date has passed can still be completed.

use super::{ServiceError, ServiceResult};
use crate::dto::paging::{PageRequest, PagedResult};
use crate::dto::todo::{parse_priority, CreateTodoRequest, TodoDto, TodoFilter, UpdateTodoRequest};
use crate::dto::validation::ValidationError;
use crate::model::todo::{Priority, Todo, DEFAULT_CATEGORY_ID};
use crate::model::todo_note::TodoNote;
use crate::model::{timestamp_now, to_storage_precision, EntityId};
use crate::repo::category_repo::CategoryRepository;
use crate::repo::todo_note_repo::TodoNoteRepository;
use crate::repo::todo_repo::{TodoListQuery, TodoRepository, TodoSort};
use log::info;

/// Todo service facade over repository implementations.
pub struct TodoService<T, C, N>
where
    T: TodoRepository,
    C: CategoryRepository,
    N: TodoNoteRepository,
{
    todos: T,
    categories: C,
    notes: N,
}

impl<T, C, N> TodoService<T, C, N>
where
    T: TodoRepository,
    C: CategoryRepository,
    N: TodoNoteRepository,
{
    pub fn new(todos: T, categories: C, notes: N) -> Self {
        Self {
            todos,
            categories,
            notes,
        }
    }

    /// All todos in id order.
    pub fn list(&self, include_relations: bool) -> ServiceResult<Vec<TodoDto>> {
        self.query(&TodoListQuery::default(), include_relations)
    }

    pub fn get_by_id(
        &self,
        id: EntityId,
        include_relations: bool,
    ) -> ServiceResult<Option<TodoDto>> {
        Ok(self
            .todos
            .get_record(id)?
            .map(|record| TodoDto::from_record(record, include_relations)))
    }

    pub fn create(&self, request: &CreateTodoRequest) -> ServiceResult<TodoDto> {
        let now = timestamp_now();
        request.validate(now)?;

        let category_id = request.category_id.unwrap_or(DEFAULT_CATEGORY_ID);
        self.ensure_category_exists(category_id)?;

        let mut todo = Todo::new(request.title.trim(), now);
        todo.description = request.description.clone();
        todo.due_date = request.due_date.map(to_storage_precision);
        todo.priority = parse_priority(request.priority)?;
        todo.category_id = category_id;
        let created = self.todos.add(&todo)?;

        if let Some(content) = request
            .initial_note
            .as_deref()
            .filter(|content| !content.trim().is_empty())
        {
            self.notes.add(&TodoNote::new(created.id, content, now))?;
        }

        info!(
            "event=todo_create module=service status=ok todo_id={} category_id={}",
            created.id, created.category_id
        );
        Ok(created.into())
    }

    /// Replaces every mutable field; keeps the category when the request
    /// omits it. `None` when `id` is absent.
    pub fn update(
        &self,
        id: EntityId,
        request: &UpdateTodoRequest,
    ) -> ServiceResult<Option<TodoDto>> {
        let now = timestamp_now();
        request.validate(now)?;
        let Some(mut todo) = self.todos.get_by_id(id)? else {
            return Ok(None);
        };

        if let Some(category_id) = request.category_id {
            if category_id != todo.category_id {
                self.ensure_category_exists(category_id)?;
            }
            todo.category_id = category_id;
        }
        todo.title = request.title.trim().to_string();
        todo.description = request.description.clone();
        todo.is_completed = request.is_completed;
        todo.due_date = request.due_date.map(to_storage_precision);
        todo.priority = parse_priority(request.priority)?;
        todo.updated_at = Some(now);

        self.todos.update(&todo)?;
        info!("event=todo_update module=service status=ok todo_id={id}");
        Ok(Some(todo.into()))
    }

    /// Hard delete; notes go with the todo. `false` when `id` is absent.
    pub fn delete(&self, id: EntityId) -> ServiceResult<bool> {
        if !self.todos.exists(id)? {
            return Ok(false);
        }
        self.todos.delete(id)?;
        info!("event=todo_delete module=service status=ok todo_id={id}");
        Ok(true)
    }

    pub fn mark_completed(&self, id: EntityId) -> ServiceResult<Option<TodoDto>> {
        self.set_completed(id, true)
    }

    pub fn mark_pending(&self, id: EntityId) -> ServiceResult<Option<TodoDto>> {
        self.set_completed(id, false)
    }

    pub fn get_by_category(&self, category_id: EntityId) -> ServiceResult<Vec<TodoDto>> {
        self.query(
            &TodoListQuery {
                category_id: Some(category_id),
                ..TodoListQuery::default()
            },
            false,
        )
    }

    pub fn get_completed(&self) -> ServiceResult<Vec<TodoDto>> {
        self.by_status(true)
    }

    pub fn get_pending(&self) -> ServiceResult<Vec<TodoDto>> {
        self.by_status(false)
    }

    /// Rejects priorities outside `1..=3` with a validation error.
    pub fn get_by_priority(&self, priority: i64) -> ServiceResult<Vec<TodoDto>> {
        let priority: Priority = parse_priority(priority)?;
        self.query(
            &TodoListQuery {
                priority: Some(priority),
                ..TodoListQuery::default()
            },
            false,
        )
    }

    /// Pending todos whose due date is before now.
    pub fn get_overdue(&self) -> ServiceResult<Vec<TodoDto>> {
        self.query(
            &TodoListQuery {
                is_completed: Some(false),
                due_before: Some(timestamp_now()),
                sort: TodoSort::DueDateAsc,
                ..TodoListQuery::default()
            },
            false,
        )
    }

    pub fn get_filtered(&self, filter: &TodoFilter) -> ServiceResult<Vec<TodoDto>> {
        self.query(
            &TodoListQuery {
                category_id: filter.category_id,
                is_completed: filter.done,
                sort: filter.sort_order(),
                ..TodoListQuery::default()
            },
            filter.include,
        )
    }

    /// One id-ordered page of todos.
    pub fn get_paged(
        &self,
        request: &PageRequest,
        include_relations: bool,
    ) -> ServiceResult<PagedResult<TodoDto>> {
        let page = request.normalize()?;
        let query = TodoListQuery {
            limit: Some(page.size),
            offset: page.number.saturating_sub(1).saturating_mul(page.size),
            ..TodoListQuery::default()
        };
        let items = self.query(&query, include_relations)?;
        let total_count = self.todos.count_matching(&query)?;
        Ok(PagedResult::new(items, total_count, page))
    }

    fn by_status(&self, is_completed: bool) -> ServiceResult<Vec<TodoDto>> {
        self.query(
            &TodoListQuery {
                is_completed: Some(is_completed),
                ..TodoListQuery::default()
            },
            false,
        )
    }

    fn query(&self, query: &TodoListQuery, include_relations: bool) -> ServiceResult<Vec<TodoDto>> {
        Ok(self
            .todos
            .list_records(query)?
            .into_iter()
            .map(|record| TodoDto::from_record(record, include_relations))
            .collect())
    }

    fn set_completed(&self, id: EntityId, completed: bool) -> ServiceResult<Option<TodoDto>> {
        let Some(mut todo) = self.todos.get_by_id(id)? else {
            return Ok(None);
        };
        todo.set_completed(completed, timestamp_now());
        self.todos.update(&todo)?;
        info!("event=todo_status module=service status=ok todo_id={id} is_completed={completed}");
        Ok(Some(todo.into()))
    }

    fn ensure_category_exists(&self, category_id: EntityId) -> ServiceResult<()> {
        if self.categories.exists(category_id)? {
            return Ok(());
        }
        Err(ServiceError::Validation(ValidationError::single(
            "categoryId",
            format!("category {category_id} does not exist"),
        )))
    }
}
