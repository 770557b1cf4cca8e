//! Quiz question selection.
//!
//! A quiz session is caller-held state: the ids asked so far and the chosen
//! category. Each step hands that state to [`QuizSelector::next_question`],
//! which returns an unseen question or `None` once the category is exhausted.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use trivia_db::{Question, RecordStore};

use crate::error::Result;
use crate::query::{matching, FormattedQuestion, QuestionFilter};

/// Category id that stands for "all categories" in quiz requests.
pub const ALL_CATEGORIES: i64 = 0;

/// Category restriction for a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizCategory {
    All,
    Id(i64),
}

impl QuizCategory {
    pub fn id(self) -> Option<i64> {
        match self {
            QuizCategory::All => None,
            QuizCategory::Id(id) => Some(id),
        }
    }
}

impl From<i64> for QuizCategory {
    fn from(id: i64) -> Self {
        if id == ALL_CATEGORIES {
            QuizCategory::All
        } else {
            QuizCategory::Id(id)
        }
    }
}

/// How the next question is picked from the candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Uniform random draw.
    #[default]
    Random,
    /// Lowest remaining id.
    First,
}

/// Picks the next unseen question.
pub struct QuizSelector {
    store: Arc<dyn RecordStore>,
    mode: SelectionMode,
}

impl QuizSelector {
    pub fn new(store: Arc<dyn RecordStore>, mode: SelectionMode) -> Self {
        Self { store, mode }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Questions not yet asked in `category`, ascending by id.
    pub fn candidates(
        &self,
        previously_asked: &[i64],
        category: QuizCategory,
    ) -> Result<Vec<Question>> {
        let filter = QuestionFilter {
            category: category.id(),
            search: None,
            exclude: previously_asked.iter().copied().collect(),
        };
        matching(self.store.as_ref(), &filter)
    }

    /// Select the next question, or `None` when every candidate was asked.
    pub fn next_question<R: Rng + ?Sized>(
        &self,
        previously_asked: &[i64],
        category: QuizCategory,
        rng: &mut R,
    ) -> Result<Option<FormattedQuestion>> {
        let candidates = self.candidates(previously_asked, category)?;

        let picked = match self.mode {
            SelectionMode::Random => candidates.choose(rng),
            SelectionMode::First => candidates.first(),
        };

        tracing::debug!(
            candidates = candidates.len(),
            asked = previously_asked.len(),
            picked = ?picked.map(|q| q.id),
            "Quiz step"
        );

        Ok(picked.cloned().map(FormattedQuestion::from))
    }
}

/// Compare a player's answer with the expected one, ignoring case and
/// surrounding whitespace.
pub fn answer_matches(expected: &str, given: &str) -> bool {
    expected.trim().to_lowercase() == given.trim().to_lowercase()
}

/// Caller-side state of one quiz run.
#[derive(Debug, Clone)]
pub struct QuizSession {
    category: QuizCategory,
    asked: Vec<i64>,
    correct: usize,
}

impl QuizSession {
    pub fn new(category: QuizCategory) -> Self {
        Self {
            category,
            asked: Vec::new(),
            correct: 0,
        }
    }

    pub fn category(&self) -> QuizCategory {
        self.category
    }

    pub fn asked(&self) -> &[i64] {
        &self.asked
    }

    /// Draw the next question for this session.
    pub fn next<R: Rng + ?Sized>(
        &self,
        selector: &QuizSelector,
        rng: &mut R,
    ) -> Result<Option<FormattedQuestion>> {
        selector.next_question(&self.asked, self.category, rng)
    }

    /// Record an answer to `question`. Returns whether it was correct.
    pub fn record(&mut self, question: &FormattedQuestion, answer: &str) -> bool {
        if !self.asked.contains(&question.id) {
            self.asked.push(question.id);
        }
        let correct = answer_matches(&question.answer, answer);
        if correct {
            self.correct += 1;
        }
        correct
    }

    /// `(correct, asked)`
    pub fn score(&self) -> (usize, usize) {
        (self.correct, self.asked.len())
    }
}
