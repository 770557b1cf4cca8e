//! Filtered, paginated question queries.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use serde::Serialize;
use trivia_db::{Question, RecordStore};

use crate::error::Result;
use crate::pagination::paginate;

/// A question as presented to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedQuestion {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category_id: i64,
    pub difficulty: i64,
}

impl From<Question> for FormattedQuestion {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            question: q.question,
            answer: q.answer,
            category_id: q.category,
            difficulty: q.difficulty,
        }
    }
}

/// Composable question filters. All set filters must match.
#[derive(Debug, Clone, Default)]
pub struct QuestionFilter {
    /// Only questions in this category.
    pub category: Option<i64>,
    /// Case-insensitive substring of the question text. Empty means no filter.
    pub search: Option<String>,
    /// Ids to leave out.
    pub exclude: HashSet<i64>,
}

impl QuestionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: i64) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn excluding(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.exclude.extend(ids);
        self
    }

    /// Build the predicate for this filter. The search term is lowered once.
    pub fn matcher(&self) -> impl Fn(&Question) -> bool + '_ {
        let term = self
            .search
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);

        move |q: &Question| {
            if let Some(category) = self.category {
                if q.category != category {
                    return false;
                }
            }

            if self.exclude.contains(&q.id) {
                return false;
            }

            if let Some(ref term) = term {
                if !q.question.to_lowercase().contains(term.as_str()) {
                    return false;
                }
            }

            true
        }
    }
}

/// Every question in `store` matching `filter`, ascending by id.
pub(crate) fn matching(
    store: &dyn RecordStore,
    filter: &QuestionFilter,
) -> Result<Vec<Question>> {
    let matcher = filter.matcher();
    let mut matches = store.filter_questions(&matcher)?;
    matches.sort_by_key(|q| q.id);
    Ok(matches)
}

/// One page of query results with listing metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPage {
    pub items: Vec<FormattedQuestion>,
    /// Matches before pagination.
    pub total_count: usize,
    /// Every known category, id to label.
    pub categories: BTreeMap<i64, String>,
    /// Label of the filtered category, if any.
    pub current_category: Option<String>,
}

/// Runs filtered queries against a record store snapshot.
pub struct QueryService {
    store: Arc<dyn RecordStore>,
    page_size: usize,
}

impl QueryService {
    pub fn new(store: Arc<dyn RecordStore>, page_size: usize) -> Self {
        Self { store, page_size }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// All category labels keyed by id.
    pub fn category_labels(&self) -> Result<BTreeMap<i64, String>> {
        Ok(self
            .store
            .list_categories()?
            .into_iter()
            .map(|c| (c.id, c.label))
            .collect())
    }

    /// Every question matching `filter`, ascending by id.
    pub fn matching(&self, filter: &QuestionFilter) -> Result<Vec<Question>> {
        matching(self.store.as_ref(), filter)
    }

    /// Return page `page` of the questions matching `filter`.
    ///
    /// A category filter on an id with no category row still matches the
    /// questions carrying that id; `current_category` is then `None`.
    pub fn query(&self, filter: &QuestionFilter, page: usize) -> Result<QuestionPage> {
        let matches = self.matching(filter)?;
        let categories = self.category_labels()?;

        let current_category = filter
            .category
            .and_then(|id| categories.get(&id).cloned());

        let items: Vec<FormattedQuestion> = paginate(page, self.page_size, &matches)
            .iter()
            .cloned()
            .map(FormattedQuestion::from)
            .collect();

        tracing::debug!(
            page,
            total = matches.len(),
            returned = items.len(),
            category = ?filter.category,
            "Question query"
        );

        Ok(QuestionPage {
            items,
            total_count: matches.len(),
            categories,
            current_category,
        })
    }
}
