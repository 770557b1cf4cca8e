//! The record store abstraction shared by the SQLite and in-memory backends.

use thiserror::Error;

use crate::model::{Category, NewQuestion, Question};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Classify a SQLite failure. Constraint violations get their own variant.
    pub fn from_sqlite(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(failure, message)
                if failure.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                StoreError::Constraint(message.unwrap_or_else(|| failure.to_string()))
            }
            other => StoreError::Sqlite(other),
        }
    }

    pub fn is_constraint(&self) -> bool {
        matches!(self, StoreError::Constraint(_))
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Persistence contract used by the query and quiz components.
///
/// Listing methods return records in ascending id order. A question's
/// category id is stored as given; it may name no existing category.
pub trait RecordStore: Send + Sync {
    fn list_categories(&self) -> StoreResult<Vec<Category>>;

    fn get_category(&self, id: i64) -> StoreResult<Option<Category>>;

    /// Insert a category with an explicit id. Duplicate ids are a constraint
    /// violation.
    fn insert_category(&self, category: &Category) -> StoreResult<()>;

    fn list_questions(&self) -> StoreResult<Vec<Question>>;

    fn get_question(&self, id: i64) -> StoreResult<Option<Question>>;

    /// Insert a question and return its new id.
    fn insert_question(&self, question: &NewQuestion) -> StoreResult<i64>;

    /// Delete a question. Returns `false` when no record had that id.
    fn delete_question(&self, id: i64) -> StoreResult<bool>;

    /// All questions matching `predicate`, in ascending id order.
    fn filter_questions(
        &self,
        predicate: &dyn Fn(&Question) -> bool,
    ) -> StoreResult<Vec<Question>> {
        Ok(self
            .list_questions()?
            .into_iter()
            .filter(|q| predicate(q))
            .collect())
    }
}
