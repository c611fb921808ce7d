//! Entity shapes shared by the storage backends and the HTTP layer.
//!
//! Field names serialize in camelCase to match the quiz client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of answer options every question carries.
pub const OPTION_COUNT: usize = 4;

/// Placeholder returned in place of the admin password.
pub const REDACTED_PASSWORD: &str = "[PROTECTED]";

pub const ADMIN_ID: &str = "admin-1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i32,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: i32,
}

impl Question {
    pub fn from_insert(id: i32, insert: InsertQuestion) -> Self {
        Question {
            id,
            question: insert.question,
            options: insert.options,
            correct_answer: insert.correct_answer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub id: i32,
    pub student_name: String,
    pub score: i32,
    pub total_questions: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertScore {
    pub student_name: String,
    pub score: i32,
    pub total_questions: i32,
}

/// Authenticated admin. The password field always holds [`REDACTED_PASSWORD`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    pub id: String,
    pub username: String,
    pub password: String,
}

impl Admin {
    pub fn redacted(username: &str) -> Self {
        Admin {
            id: ADMIN_ID.to_string(),
            username: username.to_string(),
            password: REDACTED_PASSWORD.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminLogin {
    pub username: String,
    pub password: String,
}
