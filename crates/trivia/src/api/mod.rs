//! # Trivia HTTP API
//!
//! ## Endpoints
//!
//! - `GET /categories` - List categories
//! - `GET /categories/{id}/questions?page=N` - One page of a category
//! - `GET /questions?page=N&search=TERM` - One page of all (or matching) questions
//! - `POST /questions` - Create a question, or search when the body has `searchTerm`
//! - `DELETE /questions/{id}` - Delete a question
//! - `POST /quizzes` - Next unseen quiz question
//! - `GET /health` - Liveness probe
//!
//! Success bodies carry `"success": true`; failures use the envelope built by
//! [`ApiError`].

mod categories;
mod error;
mod questions;
mod quizzes;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::response::Json;
use axum::routing::{delete, get, post};
use axum::Router;
use serde::Serialize;
use tower_http::cors::CorsLayer;

use trivia_core::TriviaService;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TriviaService>,
}

pub fn create_router(service: Arc<TriviaService>) -> Router {
    let state = AppState { service };

    Router::new()
        .route("/health", get(health))
        .route("/categories", get(categories::list_categories))
        .route(
            "/categories/{id}/questions",
            get(categories::questions_by_category),
        )
        .route(
            "/questions",
            get(questions::list_questions).post(questions::post_questions),
        )
        .route("/questions/{id}", delete(questions::delete_question))
        .route("/quizzes", post(quizzes::play_quiz))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    success: bool,
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        status: "ok",
    })
}
