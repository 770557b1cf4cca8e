//! Categories table.

use rusqlite::{params, Connection, OptionalExtension};
use std::sync::MutexGuard;

use crate::model::Category;
use crate::store::{StoreError, StoreResult};

/// Categories store with a borrowed connection.
pub struct Categories<'db> {
    conn: MutexGuard<'db, Connection>,
}

impl<'db> Categories<'db> {
    pub(crate) fn new(conn: MutexGuard<'db, Connection>) -> Self {
        Self { conn }
    }

    /// List all categories ordered by id.
    pub fn list(&self) -> StoreResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, type FROM categories ORDER BY id")?;
        let rows = stmt.query_map([], Self::row_to_category)?;

        let mut categories = Vec::new();
        for row in rows {
            categories.push(row?);
        }

        Ok(categories)
    }

    /// Get a category by id.
    pub fn get(&self, id: i64) -> StoreResult<Option<Category>> {
        let category = self
            .conn
            .query_row(
                "SELECT id, type FROM categories WHERE id = ?1",
                params![id],
                Self::row_to_category,
            )
            .optional()?;
        Ok(category)
    }

    /// Insert a category keeping its id.
    pub fn insert(&self, category: &Category) -> StoreResult<()> {
        self.conn
            .execute(
                "INSERT INTO categories (id, type) VALUES (?1, ?2)",
                params![category.id, category.label],
            )
            .map_err(StoreError::from_sqlite)?;
        Ok(())
    }

    fn row_to_category(row: &rusqlite::Row) -> Result<Category, rusqlite::Error> {
        Ok(Category {
            id: row.get(0)?,
            label: row.get(1)?,
        })
    }
}
