//! Category table metadata and category-specific queries.
//!
//! # Invariants
//! - Name lookups are case-insensitive (Unicode lowercase comparison).
//! - Active listing is ordered alphabetically, case-insensitively.
//! - Deleting a category still referenced by todos fails with
//!   `RepoError::ReferentialConstraint`; nothing is cascaded.

use crate::model::category::Category;
use crate::model::{format_timestamp, EntityId};
use crate::repo::base_repo::{
    bool_column, bool_to_int, timestamp_column, Entity, RepoResult, Repository, SqliteRepository,
};
use rusqlite::types::Value;
use rusqlite::Row;

impl Entity for Category {
    const TABLE: &'static str = "categories";
    const COLUMNS: &'static [&'static str] = &["name", "description", "is_active", "created_at"];

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            is_active: bool_column(row, "is_active")?,
            created_at: timestamp_column(row, "created_at")?,
        })
    }

    fn bind_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            self.description.clone().map_or(Value::Null, Value::Text),
            Value::Integer(bool_to_int(self.is_active)),
            Value::Text(format_timestamp(&self.created_at)),
        ]
    }
}

/// Category repository: generic CRUD plus category lookups.
pub trait CategoryRepository: Repository<Category> {
    /// Active categories ordered by name.
    fn list_active(&self) -> RepoResult<Vec<Category>>;
    /// First category whose name matches case-insensitively.
    fn get_by_name(&self, name: &str) -> RepoResult<Option<Category>>;
}

pub type SqliteCategoryRepository<'conn> = SqliteRepository<'conn, Category>;

impl CategoryRepository for SqliteRepository<'_, Category> {
    fn list_active(&self) -> RepoResult<Vec<Category>> {
        let sql = format!(
            "{} WHERE is_active = 1 ORDER BY name COLLATE NOCASE ASC, id ASC;",
            Self::select_sql()
        );
        self.query_entities(&sql, Vec::new())
    }

    fn get_by_name(&self, name: &str) -> RepoResult<Option<Category>> {
        Ok(self
            .find(&|category: &Category| category.has_name(name))?
            .into_iter()
            .next())
    }
}
