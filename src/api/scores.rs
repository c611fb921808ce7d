use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::debug;

use super::{validated, AppState};
use crate::error::Result;
use crate::schema::{InsertScore, Score};

pub async fn list_scores(State(state): State<AppState>) -> Result<Json<Vec<Score>>> {
    Ok(Json(state.storage.get_scores().await?))
}

pub async fn submit_score(
    State(state): State<AppState>,
    payload: std::result::Result<Json<InsertScore>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let insert = validated(payload)?;

    debug!(
        "Score submission from {}: {}/{}",
        insert.student_name, insert.score, insert.total_questions
    );

    let score = state.storage.add_score(insert).await?;

    Ok((StatusCode::CREATED, Json(score)))
}
