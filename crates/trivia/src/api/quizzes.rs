use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use trivia_core::{FormattedQuestion, NumericField, QuizCategory};

use super::{ApiError, AppState};

/// `POST /quizzes` body. Accepts both the camelCase keys and the older
/// snake_case ones (`previous_questions`, `quiz_category`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRequest {
    #[serde(default, alias = "previous_questions")]
    pub previously_asked_ids: Vec<i64>,
    #[serde(default, alias = "quiz_category")]
    pub category: Option<QuizCategoryBody>,
}

/// Only `id` is read; a category label sent alongside it is ignored.
#[derive(Debug, Deserialize)]
pub struct QuizCategoryBody {
    pub id: NumericField,
}

impl QuizRequest {
    fn category(&self) -> Result<QuizCategory, ApiError> {
        match &self.category {
            None => Ok(QuizCategory::All),
            Some(body) => Ok(QuizCategory::from(body.id.resolve("category id")?)),
        }
    }
}

#[derive(Serialize)]
pub struct QuizResponse {
    pub success: bool,
    /// `null` once every question in the category has been asked.
    pub question: Option<FormattedQuestion>,
}

pub async fn play_quiz(
    State(state): State<AppState>,
    body: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<Json<QuizResponse>, ApiError> {
    let Json(request) = body?;
    let category = request.category()?;

    let question = state.service.next_quiz_question(
        &request.previously_asked_ids,
        category,
        &mut rand::thread_rng(),
    )?;

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}
