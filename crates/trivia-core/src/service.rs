//! The trivia operations: listing, search, create, delete and quiz steps.
//!
//! # Error policy
//! - Listing operations that must return something (categories, plain
//!   question listing, category listing) report an empty result as
//!   [`TriviaError::NotFound`].
//! - Search may return an empty page.
//! - Input is validated before the store is touched; store failures on
//!   writes become [`TriviaError::Unprocessable`].
//! - An exhausted quiz is `Ok(None)`, never an error.

use std::sync::Arc;

use rand::Rng;
use serde::Deserialize;
use trivia_db::{Category, NewQuestion, RecordStore};

use crate::error::{Result, TriviaError};
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::query::{FormattedQuestion, QueryService, QuestionFilter, QuestionPage};
use crate::quiz::{QuizCategory, QuizSelector, SelectionMode};

/// Tunables for [`TriviaService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceConfig {
    pub page_size: usize,
    pub selection: SelectionMode,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            selection: SelectionMode::default(),
        }
    }
}

/// An integer field that legacy clients send either as a number or as a
/// numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(i64),
    Text(String),
}

impl NumericField {
    /// Read the value as an integer. `field` names it in error messages.
    pub fn resolve(&self, field: &str) -> Result<i64> {
        match self {
            NumericField::Number(n) => Ok(*n),
            NumericField::Text(s) if s.trim().is_empty() => {
                Err(TriviaError::Unprocessable(format!("{} is required", field)))
            }
            NumericField::Text(s) => s.trim().parse().map_err(|_| {
                TriviaError::BadRequest(format!("{} must be an integer, got {:?}", field, s))
            }),
        }
    }
}

impl From<i64> for NumericField {
    fn from(n: i64) -> Self {
        NumericField::Number(n)
    }
}

/// Unvalidated creation payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateQuestion {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<NumericField>,
    pub difficulty: Option<NumericField>,
}

impl CreateQuestion {
    /// Check that all four fields are present and non-blank.
    pub fn validate(&self) -> Result<NewQuestion> {
        let question = required_text(self.question.as_deref(), "question")?;
        let answer = required_text(self.answer.as_deref(), "answer")?;
        let category = self
            .category
            .as_ref()
            .ok_or_else(|| TriviaError::Unprocessable("category is required".to_string()))?
            .resolve("category")?;
        let difficulty = self
            .difficulty
            .as_ref()
            .ok_or_else(|| TriviaError::Unprocessable("difficulty is required".to_string()))?
            .resolve("difficulty")?;

        Ok(NewQuestion {
            question,
            answer,
            category,
            difficulty,
        })
    }
}

fn required_text(value: Option<&str>, field: &str) -> Result<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(TriviaError::Unprocessable(format!("{} is required", field))),
    }
}

/// Result of a successful create.
#[derive(Debug, Clone)]
pub struct QuestionCreated {
    pub id: i64,
    /// The requested page of the full listing after the insert.
    pub page: QuestionPage,
}

/// Entry point for every trivia operation. Holds the injected store.
pub struct TriviaService {
    store: Arc<dyn RecordStore>,
    queries: QueryService,
    quiz: QuizSelector,
}

impl TriviaService {
    pub fn new(store: Arc<dyn RecordStore>, config: ServiceConfig) -> Self {
        Self {
            queries: QueryService::new(store.clone(), config.page_size),
            quiz: QuizSelector::new(store.clone(), config.selection),
            store,
        }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    pub fn queries(&self) -> &QueryService {
        &self.queries
    }

    pub fn quiz(&self) -> &QuizSelector {
        &self.quiz
    }

    pub fn page_size(&self) -> usize {
        self.queries.page_size()
    }

    /// All categories ordered by id.
    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let categories = self.store.list_categories()?;
        if categories.is_empty() {
            return Err(TriviaError::NotFound("no categories".to_string()));
        }
        Ok(categories)
    }

    /// One page of all questions.
    pub fn list_questions(&self, page: Option<usize>) -> Result<QuestionPage> {
        let page = resolve_page(page)?;
        let result = self.queries.query(&QuestionFilter::new(), page)?;
        if result.items.is_empty() {
            return Err(TriviaError::NotFound(format!("no questions on page {}", page)));
        }
        Ok(result)
    }

    /// One page of the questions in `category_id`.
    pub fn questions_by_category(
        &self,
        category_id: i64,
        page: Option<usize>,
    ) -> Result<QuestionPage> {
        let page = resolve_page(page)?;
        if self.store.get_category(category_id)?.is_none() {
            return Err(TriviaError::NotFound(format!("category {}", category_id)));
        }

        let filter = QuestionFilter::new().with_category(category_id);
        let result = self.queries.query(&filter, page)?;
        if result.items.is_empty() {
            return Err(TriviaError::NotFound(format!(
                "no questions in category {} on page {}",
                category_id, page
            )));
        }
        Ok(result)
    }

    /// One page of the questions whose text contains `term`. May be empty.
    pub fn search_questions(&self, term: &str, page: Option<usize>) -> Result<QuestionPage> {
        let page = resolve_page(page)?;
        self.queries
            .query(&QuestionFilter::new().with_search(term), page)
    }

    /// Validate and insert a question.
    pub fn create_question(
        &self,
        input: &CreateQuestion,
        page: Option<usize>,
    ) -> Result<QuestionCreated> {
        let page = resolve_page(page)?;
        let new_question = input.validate()?;

        let id = self
            .store
            .insert_question(&new_question)
            .map_err(TriviaError::write_failed)?;
        tracing::info!(id, category = new_question.category, "Created question");

        let page = self.queries.query(&QuestionFilter::new(), page)?;
        Ok(QuestionCreated { id, page })
    }

    /// Delete a question, returning its id.
    pub fn delete_question(&self, id: i64) -> Result<i64> {
        if self.store.get_question(id)?.is_none() {
            return Err(TriviaError::NotFound(format!("question {}", id)));
        }

        let deleted = self
            .store
            .delete_question(id)
            .map_err(TriviaError::write_failed)?;
        if !deleted {
            return Err(TriviaError::NotFound(format!("question {}", id)));
        }

        tracing::info!(id, "Deleted question");
        Ok(id)
    }

    /// One quiz step. `Ok(None)` means no candidate is left, including when
    /// the category has no questions at all.
    pub fn next_quiz_question<R: Rng + ?Sized>(
        &self,
        previously_asked: &[i64],
        category: QuizCategory,
        rng: &mut R,
    ) -> Result<Option<FormattedQuestion>> {
        self.quiz.next_question(previously_asked, category, rng)
    }
}

/// Default a missing page to 1 and reject page 0.
pub fn resolve_page(page: Option<usize>) -> Result<usize> {
    match page {
        None => Ok(1),
        Some(0) => Err(TriviaError::BadRequest(
            "page numbers start at 1".to_string(),
        )),
        Some(p) => Ok(p),
    }
}
