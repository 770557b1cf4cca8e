//! Record stores for the trivia backend.
//!
//! Provides the [`RecordStore`] trait plus two implementations: [`Database`],
//! which owns a SQLite connection and hands out per-table stores, and
//! [`MemoryStore`] for tests and throwaway runs.

mod categories;
mod memory;
mod model;
mod questions;
mod store;

pub use categories::Categories;
pub use memory::MemoryStore;
pub use model::{Category, NewQuestion, Question};
pub use questions::Questions;
pub use store::{RecordStore, StoreError, StoreResult};

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// The main database struct that owns the SQLite connection.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create a database at a specific path.
    ///
    /// Missing parent directories are created.
    pub fn open_at(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    tracing::warn!("Failed to create {}: {}", parent.display(), e);
                }
            }
        }

        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;
        tracing::debug!(path = %path.display(), "Opened trivia database");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (useful for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Get the default database path.
    ///
    /// The default location is `~/.local/share/trivia/trivia.db`.
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("trivia")
            .join("trivia.db")
    }

    /// Access the categories store.
    pub fn categories(&self) -> StoreResult<Categories<'_>> {
        Ok(Categories::new(self.lock()?))
    }

    /// Access the questions store.
    pub fn questions(&self) -> StoreResult<Questions<'_>> {
        Ok(Questions::new(self.lock()?))
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// Initialize the database schema.
    fn init_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY,
                type TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS questions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                question TEXT NOT NULL,
                answer TEXT NOT NULL,
                category INTEGER NOT NULL,
                difficulty INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_questions_category ON questions(category);
            "#,
        )
    }
}

impl RecordStore for Database {
    fn list_categories(&self) -> StoreResult<Vec<Category>> {
        self.categories()?.list()
    }

    fn get_category(&self, id: i64) -> StoreResult<Option<Category>> {
        self.categories()?.get(id)
    }

    fn insert_category(&self, category: &Category) -> StoreResult<()> {
        self.categories()?.insert(category)
    }

    fn list_questions(&self) -> StoreResult<Vec<Question>> {
        self.questions()?.list()
    }

    fn get_question(&self, id: i64) -> StoreResult<Option<Question>> {
        self.questions()?.get(id)
    }

    fn insert_question(&self, question: &NewQuestion) -> StoreResult<i64> {
        self.questions()?.insert(question)
    }

    fn delete_question(&self, id: i64) -> StoreResult<bool> {
        self.questions()?.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(db: &Database) {
        for (id, label) in [(1, "Science"), (2, "Art")] {
            db.insert_category(&Category {
                id,
                label: label.to_string(),
            })
            .unwrap();
        }
    }

    fn new_question(text: &str, category: i64) -> NewQuestion {
        NewQuestion {
            question: text.to_string(),
            answer: "An answer".to_string(),
            category,
            difficulty: 2,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let db = Database::open_in_memory().unwrap();
        seed(&db);

        let id = db
            .insert_question(&new_question("What is the heaviest organ?", 1))
            .unwrap();

        let retrieved = db.get_question(id).unwrap().unwrap();
        assert_eq!(retrieved.id, id);
        assert_eq!(retrieved.question, "What is the heaviest organ?");
        assert_eq!(retrieved.category, 1);
        assert_eq!(retrieved.difficulty, 2);
    }

    #[test]
    fn test_list_is_ordered_by_id() {
        let db = Database::open_in_memory().unwrap();
        seed(&db);

        for text in ["first", "second", "third"] {
            db.insert_question(&new_question(text, 2)).unwrap();
        }

        let ids: Vec<i64> = db.list_questions().unwrap().iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let labels: Vec<String> = db
            .list_categories()
            .unwrap()
            .into_iter()
            .map(|c| c.label)
            .collect();
        assert_eq!(labels, vec!["Science", "Art"]);
    }

    #[test]
    fn test_delete() {
        let db = Database::open_in_memory().unwrap();
        seed(&db);

        let id = db.insert_question(&new_question("Q", 1)).unwrap();
        assert!(db.delete_question(id).unwrap());
        assert!(db.get_question(id).unwrap().is_none());

        // Deleting again returns false
        assert!(!db.delete_question(id).unwrap());
    }

    #[test]
    fn test_question_in_unknown_category_is_stored() {
        let db = Database::open_in_memory().unwrap();
        seed(&db);

        let id = db.insert_question(&new_question("Q", 10)).unwrap();
        assert_eq!(db.get_question(id).unwrap().unwrap().category, 10);
        assert!(db.get_category(10).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_category_id() {
        let db = Database::open_in_memory().unwrap();
        seed(&db);

        let err = db
            .insert_category(&Category {
                id: 1,
                label: "Again".to_string(),
            })
            .unwrap_err();
        assert!(err.is_constraint());
    }

    #[test]
    fn test_filter_questions() {
        let db = Database::open_in_memory().unwrap();
        seed(&db);
        db.insert_question(&new_question("Science one", 1)).unwrap();
        db.insert_question(&new_question("Art one", 2)).unwrap();
        db.insert_question(&new_question("Science two", 1)).unwrap();

        let science = db.filter_questions(&|q| q.category == 1).unwrap();
        let ids: Vec<i64> = science.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_reopen_on_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("trivia.db");

        {
            let db = Database::open_at(&path).unwrap();
            seed(&db);
            db.insert_question(&new_question("Persisted?", 1)).unwrap();
        }

        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.list_categories().unwrap().len(), 2);
        assert_eq!(db.list_questions().unwrap()[0].question, "Persisted?");
    }
}
