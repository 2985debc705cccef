//! Generic repository contract and its single SQLite implementation.
//!
//! # Responsibility
//! - Provide the per-entity CRUD contract (`Repository<T>`).
//! - Implement it once over table metadata supplied by `Entity`.
//! - Classify storage failures into semantic repository errors.
//!
//! # Invariants
//! - Every call is a single statement against the store; no caching and no
//!   multi-statement transactions.
//! - `get_all` and `get_paged` order by `id ASC`, so pages are stable slices
//!   of the full listing.
//! - `delete` of an absent id is a no-op, `update` of an absent id is
//!   `RepoError::NotFound`.

use crate::db::DbError;
use crate::model::{parse_timestamp, EntityId};
use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound {
        table: &'static str,
        id: EntityId,
    },
    /// A foreign key blocked the write (restricted delete or dangling parent).
    ReferentialConstraint(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { table, id } => write!(f, "{table} row not found: {id}"),
            Self::ReferentialConstraint(message) => {
                write!(f, "referential constraint violated: {message}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::ReferentialConstraint(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(failure, message) = &value {
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY {
                return Self::ReferentialConstraint(
                    message
                        .clone()
                        .unwrap_or_else(|| "FOREIGN KEY constraint failed".to_string()),
                );
            }
        }
        Self::Db(DbError::Sqlite(value))
    }
}

/// Table metadata and row codec for one persisted entity type.
pub trait Entity: Sized {
    /// Table holding the entity rows.
    const TABLE: &'static str;
    /// Non-id columns, in the order produced by `bind_values`.
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> EntityId;
    /// Decodes one row selected as `id` followed by `COLUMNS`.
    fn from_row(row: &Row<'_>) -> RepoResult<Self>;
    /// Values for `COLUMNS`, used by inserts and updates.
    fn bind_values(&self) -> Vec<Value>;
}

/// Generic CRUD contract implemented once per entity type.
pub trait Repository<T> {
    fn get_by_id(&self, id: EntityId) -> RepoResult<Option<T>>;
    fn get_all(&self) -> RepoResult<Vec<T>>;
    /// Rows of `get_all` accepted by `predicate`, in the same order.
    fn find(&self, predicate: &dyn Fn(&T) -> bool) -> RepoResult<Vec<T>>;
    /// Inserts the entity and returns it with the store-assigned id.
    fn add(&self, entity: &T) -> RepoResult<T>;
    fn update(&self, entity: &T) -> RepoResult<()>;
    fn delete(&self, id: EntityId) -> RepoResult<()>;
    fn exists(&self, id: EntityId) -> RepoResult<bool>;
    fn count(&self) -> RepoResult<u64>;
    /// One page (1-based) plus the total row count.
    fn get_paged(&self, page_number: u32, page_size: u32) -> RepoResult<(Vec<T>, u64)>;
}

/// SQLite-backed repository parametrized by `Entity` metadata.
///
/// Entity-specific queries are added by implementing the per-entity traits
/// (`CategoryRepository`, `TodoRepository`, ...) on the concrete alias.
pub struct SqliteRepository<'conn, E> {
    conn: &'conn Connection,
    _entity: PhantomData<fn() -> E>,
}

impl<'conn, E: Entity> SqliteRepository<'conn, E> {
    /// Wraps a migrated connection (see `db::open_db`).
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            _entity: PhantomData,
        }
    }

    pub fn connection(&self) -> &'conn Connection {
        self.conn
    }

    /// Runs a `SELECT id, COLUMNS ...` style statement and decodes every row.
    pub(crate) fn query_entities(&self, sql: &str, bind_values: Vec<Value>) -> RepoResult<Vec<E>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut entities = Vec::new();
        while let Some(row) = rows.next()? {
            entities.push(E::from_row(row)?);
        }
        Ok(entities)
    }

    pub(crate) fn select_sql() -> String {
        format!("SELECT id, {} FROM {}", E::COLUMNS.join(", "), E::TABLE)
    }
}

impl<E: Entity> Repository<E> for SqliteRepository<'_, E> {
    fn get_by_id(&self, id: EntityId) -> RepoResult<Option<E>> {
        let sql = format!("{} WHERE id = ?1;", Self::select_sql());
        Ok(self
            .query_entities(&sql, vec![Value::Integer(id)])?
            .into_iter()
            .next())
    }

    fn get_all(&self) -> RepoResult<Vec<E>> {
        let sql = format!("{} ORDER BY id ASC;", Self::select_sql());
        self.query_entities(&sql, Vec::new())
    }

    fn find(&self, predicate: &dyn Fn(&E) -> bool) -> RepoResult<Vec<E>> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|entity| predicate(entity))
            .collect())
    }

    fn add(&self, entity: &E) -> RepoResult<E> {
        let placeholders = (1..=E::COLUMNS.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({placeholders});",
            E::TABLE,
            E::COLUMNS.join(", ")
        );
        self.conn
            .execute(&sql, params_from_iter(entity.bind_values()))?;

        let id = self.conn.last_insert_rowid();
        self.get_by_id(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("{} row {id} missing after insert", E::TABLE))
        })
    }

    fn update(&self, entity: &E) -> RepoResult<()> {
        let assignments = E::COLUMNS
            .iter()
            .enumerate()
            .map(|(index, column)| format!("{column} = ?{}", index + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {assignments} WHERE id = ?{};",
            E::TABLE,
            E::COLUMNS.len() + 1
        );
        let mut bind_values = entity.bind_values();
        bind_values.push(Value::Integer(entity.id()));

        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                table: E::TABLE,
                id: entity.id(),
            });
        }
        Ok(())
    }

    fn delete(&self, id: EntityId) -> RepoResult<()> {
        self.conn
            .execute(&format!("DELETE FROM {} WHERE id = ?1;", E::TABLE), [id])?;
        Ok(())
    }

    fn exists(&self, id: EntityId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            &format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1);", E::TABLE),
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn count(&self) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {};", E::TABLE),
            [],
            |row| row.get(0),
        )?;
        Ok(count.max(0) as u64)
    }

    fn get_paged(&self, page_number: u32, page_size: u32) -> RepoResult<(Vec<E>, u64)> {
        let offset = u64::from(page_number.saturating_sub(1)) * u64::from(page_size);
        let sql = format!("{} ORDER BY id ASC LIMIT ?1 OFFSET ?2;", Self::select_sql());
        let items = self.query_entities(
            &sql,
            vec![
                Value::Integer(i64::from(page_size)),
                Value::Integer(offset as i64),
            ],
        )?;
        Ok((items, self.count()?))
    }
}

pub(crate) fn timestamp_column(row: &Row<'_>, column: &str) -> RepoResult<DateTime<Utc>> {
    let text: String = row.get(column)?;
    parse_timestamp(&text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid timestamp `{text}` in column {column}"))
    })
}

pub(crate) fn optional_timestamp_column(
    row: &Row<'_>,
    column: &str,
) -> RepoResult<Option<DateTime<Utc>>> {
    match row.get::<_, Option<String>>(column)? {
        Some(text) => parse_timestamp(&text).map(Some).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid timestamp `{text}` in column {column}"))
        }),
        None => Ok(None),
    }
}

pub(crate) fn bool_column(row: &Row<'_>, column: &str) -> RepoResult<bool> {
    match row.get::<_, i64>(column)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean `{other}` in column {column}"
        ))),
    }
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
