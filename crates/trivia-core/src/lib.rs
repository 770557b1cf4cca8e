//! # trivia-core
//!
//! Question queries, pagination and quiz selection for the trivia backend.
//!
//! ## Key Types
//!
//! - [`TriviaService`] - The trivia operations over an injected [`RecordStore`]
//! - [`QueryService`] - Filtered, paginated question listings
//! - [`QuizSelector`] - Picks the next unseen quiz question
//! - [`TriviaError`] - NotFound / Unprocessable / BadRequest taxonomy
//!
//! The store handle is created once by the caller and shared through an
//! `Arc`; nothing in this crate holds global state.

pub mod error;
pub mod pagination;
pub mod query;
pub mod quiz;
pub mod seed;
pub mod service;

pub use error::{Result, TriviaError};
pub use pagination::{page_count, paginate, DEFAULT_PAGE_SIZE};
pub use query::{FormattedQuestion, QueryService, QuestionFilter, QuestionPage};
pub use quiz::{
    answer_matches, QuizCategory, QuizSelector, QuizSession, SelectionMode, ALL_CATEGORIES,
};
pub use seed::{SeedData, SeedReport};
pub use service::{
    resolve_page, CreateQuestion, NumericField, QuestionCreated, ServiceConfig, TriviaService,
};

pub use trivia_db::{Category, NewQuestion, Question, RecordStore};
