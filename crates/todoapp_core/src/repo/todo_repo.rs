//! Todo table metadata and filtered/sorted todo queries.
//!
//! # Responsibility
//! - Map `Todo` onto the `todos` table for the generic repository.
//! - Build dynamic list/count queries from `TodoListQuery`.
//! - Denormalize the owning category name into `TodoRecord`.
//!
//! # Invariants
//! - Every sort order ends with an `id` tie-break so results are stable.
//! - Due-date sorting puts todos without a due date last.

use crate::model::todo::{Priority, Todo};
use crate::model::{format_timestamp, EntityId};
use crate::repo::base_repo::{
    bool_column, bool_to_int, optional_timestamp_column, timestamp_column, Entity, RepoError,
    RepoResult, Repository, SqliteRepository,
};
use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Row};

const TODO_RECORD_SELECT_SQL: &str = "SELECT
    t.id,
    t.title,
    t.description,
    t.is_completed,
    t.created_at,
    t.updated_at,
    t.due_date,
    t.priority,
    t.category_id,
    c.name AS category_name
FROM todos t
LEFT JOIN categories c ON c.id = t.category_id";

impl Entity for Todo {
    const TABLE: &'static str = "todos";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "description",
        "is_completed",
        "created_at",
        "updated_at",
        "due_date",
        "priority",
        "category_id",
    ];

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        let priority_value: i64 = row.get("priority")?;
        let priority = Priority::try_from(priority_value).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid priority `{priority_value}` in todos.priority"
            ))
        })?;

        Ok(Self {
            id: row.get("id")?,
            title: row.get("title")?,
            description: row.get("description")?,
            is_completed: bool_column(row, "is_completed")?,
            created_at: timestamp_column(row, "created_at")?,
            updated_at: optional_timestamp_column(row, "updated_at")?,
            due_date: optional_timestamp_column(row, "due_date")?,
            priority,
            category_id: row.get("category_id")?,
        })
    }

    fn bind_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.title.clone()),
            Value::Text(self.description.clone()),
            Value::Integer(bool_to_int(self.is_completed)),
            Value::Text(format_timestamp(&self.created_at)),
            optional_timestamp_value(self.updated_at.as_ref()),
            optional_timestamp_value(self.due_date.as_ref()),
            Value::Integer(self.priority.as_i64()),
            Value::Integer(self.category_id),
        ]
    }
}

/// Sort orders supported by todo listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TodoSort {
    /// Insertion order; used by plain listings and pagination.
    #[default]
    IdAsc,
    /// Newest first.
    CreatedAtDesc,
    /// High priority first.
    PriorityDesc,
    /// Earliest due date first, undated todos last.
    DueDateAsc,
}

impl TodoSort {
    fn order_by_sql(self) -> &'static str {
        match self {
            Self::IdAsc => " ORDER BY t.id ASC",
            Self::CreatedAtDesc => " ORDER BY t.created_at DESC, t.id DESC",
            Self::PriorityDesc => " ORDER BY t.priority DESC, t.id ASC",
            Self::DueDateAsc => " ORDER BY t.due_date IS NULL, t.due_date ASC, t.id ASC",
        }
    }
}

/// Filter, sort and pagination options for todo listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoListQuery {
    pub category_id: Option<EntityId>,
    pub is_completed: Option<bool>,
    pub priority: Option<Priority>,
    /// Keeps only todos with a due date strictly before this instant.
    pub due_before: Option<DateTime<Utc>>,
    pub sort: TodoSort,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Todo row joined with the name of its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRecord {
    pub todo: Todo,
    /// `None` only if the category row vanished underneath the todo.
    pub category_name: Option<String>,
}

/// Todo repository: generic CRUD plus filtered listings.
pub trait TodoRepository: Repository<Todo> {
    fn get_record(&self, id: EntityId) -> RepoResult<Option<TodoRecord>>;
    fn list_records(&self, query: &TodoListQuery) -> RepoResult<Vec<TodoRecord>>;
    /// Number of rows matching the query filters; sort and paging are ignored.
    fn count_matching(&self, query: &TodoListQuery) -> RepoResult<u64>;
}

pub type SqliteTodoRepository<'conn> = SqliteRepository<'conn, Todo>;

impl TodoRepository for SqliteRepository<'_, Todo> {
    fn get_record(&self, id: EntityId) -> RepoResult<Option<TodoRecord>> {
        let sql = format!("{TODO_RECORD_SELECT_SQL} WHERE t.id = ?1;");
        Ok(self
            .query_records(&sql, vec![Value::Integer(id)])?
            .into_iter()
            .next())
    }

    fn list_records(&self, query: &TodoListQuery) -> RepoResult<Vec<TodoRecord>> {
        let (mut sql, mut bind_values) = filtered_sql(TODO_RECORD_SELECT_SQL, query);
        sql.push_str(query.sort.order_by_sql());

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        self.query_records(&sql, bind_values)
    }

    fn count_matching(&self, query: &TodoListQuery) -> RepoResult<u64> {
        let (sql, bind_values) = filtered_sql("SELECT COUNT(*) FROM todos t", query);
        let count: i64 =
            self.connection()
                .query_row(&sql, params_from_iter(bind_values), |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }
}

impl SqliteRepository<'_, Todo> {
    fn query_records(&self, sql: &str, bind_values: Vec<Value>) -> RepoResult<Vec<TodoRecord>> {
        let mut stmt = self.connection().prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(TodoRecord {
                todo: Todo::from_row(row)?,
                category_name: row.get("category_name")?,
            });
        }
        Ok(records)
    }
}

fn filtered_sql(select: &str, query: &TodoListQuery) -> (String, Vec<Value>) {
    let mut sql = format!("{select} WHERE 1 = 1");
    let mut bind_values = Vec::new();

    if let Some(category_id) = query.category_id {
        sql.push_str(" AND t.category_id = ?");
        bind_values.push(Value::Integer(category_id));
    }

    if let Some(is_completed) = query.is_completed {
        sql.push_str(" AND t.is_completed = ?");
        bind_values.push(Value::Integer(bool_to_int(is_completed)));
    }

    if let Some(priority) = query.priority {
        sql.push_str(" AND t.priority = ?");
        bind_values.push(Value::Integer(priority.as_i64()));
    }

    if let Some(due_before) = query.due_before.as_ref() {
        sql.push_str(" AND t.due_date IS NOT NULL AND t.due_date < ?");
        bind_values.push(Value::Text(format_timestamp(due_before)));
    }

    (sql, bind_values)
}

fn optional_timestamp_value(value: Option<&DateTime<Utc>>) -> Value {
    value.map_or(Value::Null, |timestamp| {
        Value::Text(format_timestamp(timestamp))
    })
}
