//! In-memory record store.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::model::{Category, NewQuestion, Question};
use crate::store::{RecordStore, StoreError, StoreResult};

/// A [`RecordStore`] kept entirely in memory.
///
/// Mirrors the SQLite store: ids are never reused after a delete, and a
/// question's category is not checked against the categories table.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    categories: BTreeMap<i64, Category>,
    questions: BTreeMap<i64, Question>,
    last_question_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl RecordStore for MemoryStore {
    fn list_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.read()?.categories.values().cloned().collect())
    }

    fn get_category(&self, id: i64) -> StoreResult<Option<Category>> {
        Ok(self.read()?.categories.get(&id).cloned())
    }

    fn insert_category(&self, category: &Category) -> StoreResult<()> {
        let mut tables = self.write()?;
        if tables.categories.contains_key(&category.id) {
            return Err(StoreError::Constraint(
                "UNIQUE constraint failed: categories.id".to_string(),
            ));
        }
        tables.categories.insert(category.id, category.clone());
        Ok(())
    }

    fn list_questions(&self) -> StoreResult<Vec<Question>> {
        Ok(self.read()?.questions.values().cloned().collect())
    }

    fn get_question(&self, id: i64) -> StoreResult<Option<Question>> {
        Ok(self.read()?.questions.get(&id).cloned())
    }

    fn insert_question(&self, question: &NewQuestion) -> StoreResult<i64> {
        let mut tables = self.write()?;
        tables.last_question_id += 1;
        let id = tables.last_question_id;
        tables
            .questions
            .insert(id, question.clone().into_question(id));
        Ok(id)
    }

    fn delete_question(&self, id: i64) -> StoreResult<bool> {
        Ok(self.write()?.questions.remove(&id).is_some())
    }
}
