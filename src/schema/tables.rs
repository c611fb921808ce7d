//! Table definitions for persistent mode.
//!
//! `options` holds a JSON array of four strings. `created_at` is a plain
//! `TIMESTAMP` written by the database and read back as UTC.

use crate::error::{QuizError, Result};
use deadpool_postgres::Transaction;
use tracing::debug;

pub const CREATE_QUESTIONS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS questions (
        id SERIAL PRIMARY KEY,
        question TEXT NOT NULL,
        options JSON NOT NULL,
        correct_answer INTEGER NOT NULL
    )
"#;

pub const CREATE_SCORES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS scores (
        id SERIAL PRIMARY KEY,
        student_name TEXT NOT NULL,
        score INTEGER NOT NULL,
        total_questions INTEGER NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT NOW()
    )
"#;

/// Create both tables if they are missing. Safe to run on every start.
pub async fn ensure_tables(tx: &Transaction<'_>) -> Result<()> {
    for ddl in [CREATE_QUESTIONS_TABLE, CREATE_SCORES_TABLE] {
        tx.batch_execute(ddl)
            .await
            .map_err(QuizError::query("create tables"))?;
    }

    debug!("Ensured questions and scores tables exist");
    Ok(())
}
