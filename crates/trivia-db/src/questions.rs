//! Questions table.

use rusqlite::{params, Connection, OptionalExtension};
use std::sync::MutexGuard;

use crate::model::{NewQuestion, Question};
use crate::store::{StoreError, StoreResult};

const SELECT_COLUMNS: &str = "SELECT id, question, answer, category, difficulty FROM questions";

/// Questions store with a borrowed connection.
pub struct Questions<'db> {
    conn: MutexGuard<'db, Connection>,
}

impl<'db> Questions<'db> {
    pub(crate) fn new(conn: MutexGuard<'db, Connection>) -> Self {
        Self { conn }
    }

    /// List all questions ordered by id.
    pub fn list(&self) -> StoreResult<Vec<Question>> {
        let sql = format!("{} ORDER BY id", SELECT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], Self::row_to_question)?;

        let mut questions = Vec::new();
        for row in rows {
            questions.push(row?);
        }

        Ok(questions)
    }

    /// Get a question by id.
    pub fn get(&self, id: i64) -> StoreResult<Option<Question>> {
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        let question = self
            .conn
            .query_row(&sql, params![id], Self::row_to_question)
            .optional()?;
        Ok(question)
    }

    /// Insert a question and return the assigned id.
    pub fn insert(&self, question: &NewQuestion) -> StoreResult<i64> {
        self.conn
            .execute(
                "INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)",
                params![
                    question.question,
                    question.answer,
                    question.category,
                    question.difficulty,
                ],
            )
            .map_err(StoreError::from_sqlite)?;

        Ok(self.conn.last_insert_rowid())
    }

    /// Delete a question by id.
    pub fn delete(&self, id: i64) -> StoreResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM questions WHERE id = ?1", params![id])
            .map_err(StoreError::from_sqlite)?;
        Ok(rows_affected > 0)
    }

    fn row_to_question(row: &rusqlite::Row) -> Result<Question, rusqlite::Error> {
        Ok(Question {
            id: row.get(0)?,
            question: row.get(1)?,
            answer: row.get(2)?,
            category: row.get(3)?,
            difficulty: row.get(4)?,
        })
    }
}
