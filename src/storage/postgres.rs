use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use deadpool_postgres::{Client, Config as PoolConfig, Pool, Runtime};
use tokio_postgres::types::Json;
use tokio_postgres::{NoTls, Row};
use tracing::{debug, error, info};

use super::defaults::default_questions;
use super::{Storage, StorageMode};
use crate::error::{QuizError, Result};
use crate::schema::{ensure_tables, InsertQuestion, InsertScore, Question, Score};
use crate::security::AdminCredentials;

const QUESTION_COLUMNS: &str = "id, question, options, correct_answer";
const SCORE_COLUMNS: &str = "id, student_name, score, total_questions, created_at";

/// Advisory lock key held while seeding.
const SEED_LOCK_KEY: i64 = 0x7175_697a_6261_6e6b;

/// Backend over a PostgreSQL connection pool.
pub struct PostgresStorage {
    pool: Pool,
    admin: AdminCredentials,
}

impl PostgresStorage {
    /// Build the pool. No connection is opened until the first call.
    pub fn connect(database_url: &str, max_size: u32, timeout: Duration, admin: AdminCredentials) -> Result<Self> {
        let pool = create_pool(database_url, max_size, timeout)?;
        Ok(Self::from_pool(pool, admin))
    }

    pub fn from_pool(pool: Pool, admin: AdminCredentials) -> Self {
        Self { pool, admin }
    }

    async fn client(&self) -> Result<Client> {
        Ok(self.pool.get().await?)
    }

    /// Returns how many questions were inserted.
    ///
    /// Table creation, the emptiness check and the inserts run in one
    /// transaction under an advisory lock, so concurrent starts seed once.
    async fn seed_defaults(&self) -> Result<usize> {
        let mut client = self.client().await?;
        let tx = client
            .transaction()
            .await
            .map_err(QuizError::query("seed questions"))?;

        tx.execute("SELECT pg_advisory_xact_lock($1)", &[&SEED_LOCK_KEY])
            .await
            .map_err(QuizError::query("seed questions"))?;

        ensure_tables(&tx).await?;

        let row = tx
            .query_one("SELECT COUNT(*) FROM questions", &[])
            .await
            .map_err(QuizError::query("count questions"))?;
        let existing: i64 = row.get(0);

        if existing > 0 {
            debug!("Questions table already holds {} rows, skipping seed", existing);
            tx.commit().await.map_err(QuizError::query("seed questions"))?;
            return Ok(0);
        }

        let defaults = default_questions();
        for question in &defaults {
            tx.execute(
                "INSERT INTO questions (question, options, correct_answer) VALUES ($1, $2, $3)",
                &[&question.question, &Json(&question.options), &question.correct_answer],
            )
            .await
            .map_err(QuizError::query("seed questions"))?;
        }

        tx.commit().await.map_err(QuizError::query("seed questions"))?;

        Ok(defaults.len())
    }
}

#[async_trait]
impl Storage for PostgresStorage {
    fn mode(&self) -> StorageMode {
        StorageMode::Persistent
    }

    fn admin_credentials(&self) -> &AdminCredentials {
        &self.admin
    }

    async fn ping(&self) -> bool {
        match self.pool.get().await {
            Ok(client) => client.execute("SELECT 1", &[]).await.is_ok(),
            Err(_) => false,
        }
    }

    async fn get_questions(&self) -> Result<Vec<Question>> {
        let client = self.client().await?;
        let rows = client
            .query(&format!("SELECT {} FROM questions ORDER BY id", QUESTION_COLUMNS), &[])
            .await
            .map_err(QuizError::query("list questions"))?;

        Ok(rows.iter().map(question_from_row).collect())
    }

    async fn get_question_by_id(&self, id: i32) -> Result<Option<Question>> {
        let client = self.client().await?;
        let row = client
            .query_opt(&format!("SELECT {} FROM questions WHERE id = $1", QUESTION_COLUMNS), &[&id])
            .await
            .map_err(QuizError::query("load question"))?;

        Ok(row.as_ref().map(question_from_row))
    }

    async fn add_question(&self, question: InsertQuestion) -> Result<Question> {
        let client = self.client().await?;
        let row = client
            .query_one(
                &format!(
                    "INSERT INTO questions (question, options, correct_answer) VALUES ($1, $2, $3) RETURNING {}",
                    QUESTION_COLUMNS
                ),
                &[&question.question, &Json(&question.options), &question.correct_answer],
            )
            .await
            .map_err(QuizError::query("add question"))?;

        let created = question_from_row(&row);
        info!("Created question {}", created.id);
        Ok(created)
    }

    async fn update_question(&self, id: i32, question: InsertQuestion) -> Result<Option<Question>> {
        let client = self.client().await?;
        let row = client
            .query_opt(
                &format!(
                    "UPDATE questions SET question = $1, options = $2, correct_answer = $3 WHERE id = $4 RETURNING {}",
                    QUESTION_COLUMNS
                ),
                &[&question.question, &Json(&question.options), &question.correct_answer, &id],
            )
            .await
            .map_err(QuizError::query("update question"))?;

        Ok(row.as_ref().map(question_from_row))
    }

    async fn delete_question(&self, id: i32) -> Result<bool> {
        let client = self.client().await?;
        let deleted = client
            .execute("DELETE FROM questions WHERE id = $1", &[&id])
            .await
            .map_err(QuizError::query("delete question"))?;

        Ok(deleted > 0)
    }

    async fn get_scores(&self) -> Result<Vec<Score>> {
        let client = self.client().await?;
        let rows = client
            .query(
                &format!("SELECT {} FROM scores ORDER BY score DESC, id ASC", SCORE_COLUMNS),
                &[],
            )
            .await
            .map_err(QuizError::query("list scores"))?;

        Ok(rows.iter().map(score_from_row).collect())
    }

    async fn add_score(&self, score: InsertScore) -> Result<Score> {
        let client = self.client().await?;
        let row = client
            .query_one(
                &format!(
                    "INSERT INTO scores (student_name, score, total_questions) VALUES ($1, $2, $3) RETURNING {}",
                    SCORE_COLUMNS
                ),
                &[&score.student_name, &score.score, &score.total_questions],
            )
            .await
            .map_err(QuizError::query("add score"))?;

        Ok(score_from_row(&row))
    }

    async fn delete_score(&self, id: i32) -> Result<bool> {
        let client = self.client().await?;
        let deleted = client
            .execute("DELETE FROM scores WHERE id = $1", &[&id])
            .await
            .map_err(QuizError::query("delete score"))?;

        Ok(deleted > 0)
    }

    async fn clear_scores(&self) -> Result<()> {
        let client = self.client().await?;
        let cleared = client
            .execute("DELETE FROM scores", &[])
            .await
            .map_err(QuizError::query("clear scores"))?;

        info!("Cleared {} scores", cleared);
        Ok(())
    }

    async fn initialize_default_questions(&self) {
        match self.seed_defaults().await {
            Ok(0) => {}
            Ok(inserted) => info!("Seeded {} default questions", inserted),
            Err(e) => error!("Failed to initialize default questions: {}", e),
        }
    }
}

fn question_from_row(row: &Row) -> Question {
    let Json(options): Json<Vec<String>> = row.get("options");
    Question {
        id: row.get("id"),
        question: row.get("question"),
        options,
        correct_answer: row.get("correct_answer"),
    }
}

fn score_from_row(row: &Row) -> Score {
    let created_at: NaiveDateTime = row.get("created_at");
    Score {
        id: row.get("id"),
        student_name: row.get("student_name"),
        score: row.get("score"),
        total_questions: row.get("total_questions"),
        created_at: created_at.and_utc(),
    }
}

fn create_pool(database_url: &str, max_size: u32, timeout: Duration) -> Result<Pool> {
    let mut cfg = PoolConfig::new();
    cfg.url = Some(database_url.to_string());

    cfg.pool = Some(deadpool_postgres::PoolConfig {
        max_size: max_size as usize,
        timeouts: deadpool_postgres::Timeouts {
            wait: Some(timeout),
            create: Some(timeout),
            recycle: Some(timeout),
        },
        ..Default::default()
    });

    cfg.create_pool(Some(Runtime::Tokio1), NoTls)
        .map_err(|e| QuizError::Configuration {
            message: format!("Failed to create pool: {}", e),
        })
}
