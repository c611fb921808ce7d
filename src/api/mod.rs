mod admin;
mod health;
mod questions;
mod scores;

use std::time::Instant;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::Path,
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::{QuizError, Result};
use crate::schema::Validate;
use crate::security::admin_auth_middleware;
use crate::storage::StorageHandle;

pub use admin::{admin_login, clear_scores, create_question, delete_question, delete_score, update_question};
pub use health::health_check;
pub use questions::{get_question, list_questions};
pub use scores::{list_scores, submit_score};

/// Shared state for every handler.
#[derive(Clone)]
pub struct AppState {
    pub storage: StorageHandle,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(storage: StorageHandle) -> Self {
        Self {
            storage,
            started_at: Instant::now(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/questions", post(create_question))
        .route("/questions/:id", put(update_question).delete(delete_question))
        .route("/scores", delete(clear_scores))
        .route("/scores/:id", delete(delete_score))
        .route_layer(middleware::from_fn_with_state(state.clone(), admin_auth_middleware));

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/questions", get(list_questions))
        .route("/api/questions/:id", get(get_question))
        .route("/api/scores", get(list_scores).post(submit_score))
        .route("/api/admin/login", post(admin_login))
        .nest("/api/admin", admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Unwrap a JSON body and run its validation rules.
fn validated<T: Validate>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    let Json(value) = payload.map_err(|e| QuizError::InvalidRequest {
        message: e.body_text(),
    })?;
    value.validate()?;
    Ok(value)
}

fn path_id(path: std::result::Result<Path<i32>, PathRejection>) -> Result<i32> {
    let Path(id) = path.map_err(|e| QuizError::InvalidRequest {
        message: format!("Invalid id: {}", e.body_text()),
    })?;
    Ok(id)
}
