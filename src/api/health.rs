use axum::{extract::State, Json};
use serde::Serialize;

use super::AppState;
use crate::storage::StorageMode;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    mode: StorageMode,
    database_configured: bool,
    database_connected: bool,
    uptime_seconds: u64,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let mode = state.storage.mode();
    let database_connected = !mode.is_fallback() && state.storage.ping().await;

    Json(HealthResponse {
        status: "ok".to_string(),
        mode,
        database_configured: !mode.is_fallback(),
        database_connected,
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}
