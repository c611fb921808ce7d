use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::schema::{FieldIssue, ValidationError};

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("Invalid admin credentials")]
    Unauthorized,

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Connection to database failed: {cause}")]
    ConnectionFailed { cause: String },

    #[error("Query failed for {operation}: {cause}")]
    QueryFailed { operation: &'static str, cause: String },
}

impl QuizError {
    pub fn query(operation: &'static str) -> impl FnOnce(tokio_postgres::Error) -> QuizError {
        move |e| QuizError::QueryFailed {
            operation,
            cause: e.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            QuizError::Validation(_) | QuizError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            QuizError::NotFound { .. } => StatusCode::NOT_FOUND,
            QuizError::Unauthorized => StatusCode::UNAUTHORIZED,
            QuizError::Configuration { .. } | QuizError::ConnectionFailed { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            QuizError::QueryFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            QuizError::Validation(_) => "validation_failed",
            QuizError::InvalidRequest { .. } => "invalid_request",
            QuizError::NotFound { .. } => "not_found",
            QuizError::Unauthorized => "unauthorized",
            QuizError::Configuration { .. } => "configuration_error",
            QuizError::ConnectionFailed { .. } => "connection_failed",
            QuizError::QueryFailed { .. } => "query_failed",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldIssue>>,
}

impl IntoResponse for QuizError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let details = match &self {
            QuizError::Validation(err) => Some(err.issues.clone()),
            _ => None,
        };

        let message = match &self {
            QuizError::Validation(_) => "Invalid input".to_string(),
            // Backend causes stay in the log
            QuizError::QueryFailed { operation, .. } => format!("Failed to {}", operation),
            QuizError::ConnectionFailed { .. } => "Database unavailable".to_string(),
            other => other.to_string(),
        };

        let body = ErrorResponse {
            error: self.code().to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<deadpool_postgres::PoolError> for QuizError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        QuizError::ConnectionFailed { cause: err.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, QuizError>;
