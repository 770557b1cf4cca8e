use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Serialize;

use trivia_core::Category;

use super::questions::{PageParams, QuestionPageResponse};
use super::{ApiError, AppState};

#[derive(Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: Vec<Category>,
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = state.service.list_categories()?;

    Ok(Json(CategoriesResponse {
        success: true,
        categories,
    }))
}

pub async fn questions_by_category(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<QuestionPageResponse>, ApiError> {
    let Path(id) = path?;
    let Query(params) = params?;

    let page = state.service.questions_by_category(id, params.page)?;

    Ok(Json(QuestionPageResponse::new(page)))
}
