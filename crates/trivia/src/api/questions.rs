use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};

use trivia_core::{CreateQuestion, QuestionPage};

use super::{ApiError, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
    pub search: Option<String>,
}

#[derive(Serialize)]
pub struct QuestionPageResponse {
    pub success: bool,
    #[serde(flatten)]
    pub page: QuestionPage,
}

impl QuestionPageResponse {
    pub fn new(page: QuestionPage) -> Self {
        Self {
            success: true,
            page,
        }
    }
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub created: i64,
    #[serde(flatten)]
    pub page: QuestionPage,
}

#[derive(Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted: i64,
}

/// `POST /questions` body: a search when `searchTerm` is present, otherwise
/// a new question.
#[derive(Debug, Deserialize)]
pub struct QuestionsBody {
    #[serde(rename = "searchTerm", alias = "search_term")]
    pub search_term: Option<String>,
    #[serde(flatten)]
    pub create: CreateQuestion,
}

pub async fn list_questions(
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<QuestionPageResponse>, ApiError> {
    let Query(params) = params?;

    let page = match params.search.as_deref() {
        Some(term) => state.service.search_questions(term, params.page)?,
        None => state.service.list_questions(params.page)?,
    };

    Ok(Json(QuestionPageResponse::new(page)))
}

pub async fn post_questions(
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
    body: Result<Json<QuestionsBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    let Json(body) = body?;

    if let Some(term) = body.search_term.as_deref() {
        let page = state.service.search_questions(term, params.page)?;
        return Ok(Json(QuestionPageResponse::new(page)).into_response());
    }

    let created = state.service.create_question(&body.create, params.page)?;
    Ok(Json(CreatedResponse {
        success: true,
        created: created.id,
        page: created.page,
    })
    .into_response())
}

pub async fn delete_question(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let Path(id) = path?;
    let deleted = state.service.delete_question(id)?;

    Ok(Json(DeletedResponse {
        success: true,
        deleted,
    }))
}
