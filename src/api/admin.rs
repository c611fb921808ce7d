//! Admin endpoints
//!
//! - POST   /api/admin/login          - check credentials, return redacted admin
//! - POST   /api/admin/questions      - create a question
//! - PUT    /api/admin/questions/:id  - replace a question
//! - DELETE /api/admin/questions/:id  - delete a question
//! - DELETE /api/admin/scores/:id     - delete one score
//! - DELETE /api/admin/scores         - delete every score
//!
//! Everything except login sits behind `admin_auth_middleware`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::info;

use super::{path_id, validated, AppState};
use crate::error::{QuizError, Result};
use crate::schema::{Admin, AdminLogin, InsertQuestion, Question};

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    fn ok() -> Json<Self> {
        Json(SuccessResponse { success: true })
    }
}

pub async fn admin_login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AdminLogin>, JsonRejection>,
) -> Result<Json<Admin>> {
    let login = validated(payload)?;

    let admin = state
        .storage
        .validate_admin(&login.username, &login.password)
        .await
        .ok_or(QuizError::Unauthorized)?;

    info!("Admin logged in: {}", admin.username);
    Ok(Json(admin))
}

pub async fn create_question(
    State(state): State<AppState>,
    payload: std::result::Result<Json<InsertQuestion>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let insert = validated(payload)?;
    let question = state.storage.add_question(insert).await?;

    Ok((StatusCode::CREATED, Json(question)))
}

pub async fn update_question(
    State(state): State<AppState>,
    path: std::result::Result<Path<i32>, PathRejection>,
    payload: std::result::Result<Json<InsertQuestion>, JsonRejection>,
) -> Result<Json<Question>> {
    let id = path_id(path)?;
    let insert = validated(payload)?;

    state
        .storage
        .update_question(id, insert)
        .await?
        .map(Json)
        .ok_or(QuizError::NotFound { entity: "Question", id })
}

pub async fn delete_question(
    State(state): State<AppState>,
    path: std::result::Result<Path<i32>, PathRejection>,
) -> Result<Json<SuccessResponse>> {
    let id = path_id(path)?;

    if !state.storage.delete_question(id).await? {
        return Err(QuizError::NotFound { entity: "Question", id });
    }

    info!("Deleted question {}", id);
    Ok(SuccessResponse::ok())
}

pub async fn delete_score(
    State(state): State<AppState>,
    path: std::result::Result<Path<i32>, PathRejection>,
) -> Result<Json<SuccessResponse>> {
    let id = path_id(path)?;

    if !state.storage.delete_score(id).await? {
        return Err(QuizError::NotFound { entity: "Score", id });
    }

    Ok(SuccessResponse::ok())
}

pub async fn clear_scores(State(state): State<AppState>) -> Result<Json<SuccessResponse>> {
    state.storage.clear_scores().await?;
    Ok(SuccessResponse::ok())
}
