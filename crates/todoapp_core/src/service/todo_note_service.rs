//! Todo note use-case service.
//!
//! Notes are addressed by `(todo_id, note_id)`; a note that exists under a
//! different todo is treated as absent.

use super::{ServiceError, ServiceResult};
use crate::dto::todo_note::{TodoNoteDto, TodoNoteRequest};
use crate::model::todo_note::TodoNote;
use crate::model::{timestamp_now, EntityId};
use crate::repo::todo_note_repo::TodoNoteRepository;
use crate::repo::todo_repo::TodoRepository;
use log::info;

/// Note service facade over repository implementations.
pub struct TodoNoteService<N: TodoNoteRepository, T: TodoRepository> {
    notes: N,
    todos: T,
}

impl<N: TodoNoteRepository, T: TodoRepository> TodoNoteService<N, T> {
    pub fn new(notes: N, todos: T) -> Self {
        Self { notes, todos }
    }

    /// Notes of one todo, oldest first. Empty for unknown todos.
    pub fn list_by_todo(&self, todo_id: EntityId) -> ServiceResult<Vec<TodoNoteDto>> {
        Ok(self
            .notes
            .list_by_todo(todo_id)?
            .into_iter()
            .map(TodoNoteDto::from)
            .collect())
    }

    /// Fails with `NotFound` when the parent todo does not exist.
    pub fn create(
        &self,
        todo_id: EntityId,
        request: &TodoNoteRequest,
    ) -> ServiceResult<TodoNoteDto> {
        request.validate()?;
        if !self.todos.exists(todo_id)? {
            return Err(ServiceError::NotFound {
                entity: "todos",
                id: todo_id,
            });
        }

        let created = self
            .notes
            .add(&TodoNote::new(todo_id, request.content.clone(), timestamp_now()))?;
        info!(
            "event=note_create module=service status=ok todo_id={todo_id} note_id={}",
            created.id
        );
        Ok(created.into())
    }

    /// Replaces the note content. `None` when the note is not under `todo_id`.
    pub fn update(
        &self,
        todo_id: EntityId,
        note_id: EntityId,
        request: &TodoNoteRequest,
    ) -> ServiceResult<Option<TodoNoteDto>> {
        request.validate()?;
        let Some(mut note) = self.notes.get_for_todo(todo_id, note_id)? else {
            return Ok(None);
        };
        note.content = request.content.clone();
        self.notes.update(&note)?;
        info!("event=note_update module=service status=ok todo_id={todo_id} note_id={note_id}");
        Ok(Some(note.into()))
    }

    /// `false` when the note is absent or belongs to another todo.
    pub fn delete(&self, todo_id: EntityId, note_id: EntityId) -> ServiceResult<bool> {
        if self.notes.get_for_todo(todo_id, note_id)?.is_none() {
            return Ok(false);
        }
        self.notes.delete(note_id)?;
        info!("event=note_delete module=service status=ok todo_id={todo_id} note_id={note_id}");
        Ok(true)
    }
}
