use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

use super::{path_id, AppState};
use crate::error::{QuizError, Result};
use crate::schema::Question;

pub async fn list_questions(State(state): State<AppState>) -> Result<Json<Vec<Question>>> {
    Ok(Json(state.storage.get_questions().await?))
}

pub async fn get_question(
    State(state): State<AppState>,
    path: std::result::Result<Path<i32>, PathRejection>,
) -> Result<Json<Question>> {
    let id = path_id(path)?;

    state
        .storage
        .get_question_by_id(id)
        .await?
        .map(Json)
        .ok_or(QuizError::NotFound { entity: "Question", id })
}
