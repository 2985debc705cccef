//! TodoNote table metadata and per-todo note queries.

use crate::model::todo_note::TodoNote;
use crate::model::{format_timestamp, EntityId};
use crate::repo::base_repo::{
    timestamp_column, Entity, RepoResult, Repository, SqliteRepository,
};
use rusqlite::types::Value;
use rusqlite::Row;

impl Entity for TodoNote {
    const TABLE: &'static str = "todo_notes";
    const COLUMNS: &'static [&'static str] = &["todo_id", "content", "created_at"];

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: row.get("id")?,
            todo_id: row.get("todo_id")?,
            content: row.get("content")?,
            created_at: timestamp_column(row, "created_at")?,
        })
    }

    fn bind_values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.todo_id),
            Value::Text(self.content.clone()),
            Value::Text(format_timestamp(&self.created_at)),
        ]
    }
}

/// Note repository: generic CRUD plus lookups scoped to one todo.
pub trait TodoNoteRepository: Repository<TodoNote> {
    /// Notes of one todo, oldest first.
    fn list_by_todo(&self, todo_id: EntityId) -> RepoResult<Vec<TodoNote>>;
    /// The note only if it belongs to `todo_id`.
    fn get_for_todo(&self, todo_id: EntityId, note_id: EntityId)
        -> RepoResult<Option<TodoNote>>;
}

pub type SqliteTodoNoteRepository<'conn> = SqliteRepository<'conn, TodoNote>;

impl TodoNoteRepository for SqliteRepository<'_, TodoNote> {
    fn list_by_todo(&self, todo_id: EntityId) -> RepoResult<Vec<TodoNote>> {
        let sql = format!(
            "{} WHERE todo_id = ?1 ORDER BY created_at ASC, id ASC;",
            Self::select_sql()
        );
        self.query_entities(&sql, vec![Value::Integer(todo_id)])
    }

    fn get_for_todo(
        &self,
        todo_id: EntityId,
        note_id: EntityId,
    ) -> RepoResult<Option<TodoNote>> {
        let sql = format!("{} WHERE id = ?1 AND todo_id = ?2;", Self::select_sql());
        Ok(self
            .query_entities(&sql, vec![Value::Integer(note_id), Value::Integer(todo_id)])?
            .into_iter()
            .next())
    }
}
