use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use tracing::debug;

use super::defaults::{default_count, default_questions_with_ids};
use super::{Storage, StorageMode};
use crate::error::Result;
use crate::schema::{InsertQuestion, InsertScore, Question, Score};
use crate::security::AdminCredentials;

/// Upper bound (exclusive) for synthetic score ids.
const SYNTHETIC_SCORE_ID_LIMIT: i32 = 1_000_000;

/// Stateless backend used when no database is configured.
///
/// Every call rebuilds the default dataset, so nothing a caller does is
/// visible to later calls.
pub struct FallbackStorage {
    admin: AdminCredentials,
}

impl FallbackStorage {
    pub fn new(admin: AdminCredentials) -> Self {
        Self { admin }
    }

    fn find_default(id: i32) -> Option<Question> {
        default_questions_with_ids().into_iter().find(|q| q.id == id)
    }
}

#[async_trait]
impl Storage for FallbackStorage {
    fn mode(&self) -> StorageMode {
        StorageMode::Fallback
    }

    fn admin_credentials(&self) -> &AdminCredentials {
        &self.admin
    }

    async fn ping(&self) -> bool {
        true
    }

    async fn get_questions(&self) -> Result<Vec<Question>> {
        Ok(default_questions_with_ids())
    }

    async fn get_question_by_id(&self, id: i32) -> Result<Option<Question>> {
        Ok(Self::find_default(id))
    }

    async fn add_question(&self, question: InsertQuestion) -> Result<Question> {
        let id = default_count() as i32 + 1;
        debug!("Fallback mode: returning unsaved question with id {}", id);
        Ok(Question::from_insert(id, question))
    }

    async fn update_question(&self, id: i32, question: InsertQuestion) -> Result<Option<Question>> {
        Ok(Self::find_default(id).map(|_| Question::from_insert(id, question)))
    }

    async fn delete_question(&self, id: i32) -> Result<bool> {
        Ok(Self::find_default(id).is_some())
    }

    async fn get_scores(&self) -> Result<Vec<Score>> {
        Ok(Vec::new())
    }

    async fn add_score(&self, score: InsertScore) -> Result<Score> {
        let id = rand::rng().random_range(0..SYNTHETIC_SCORE_ID_LIMIT);
        debug!("Fallback mode: returning unsaved score with id {}", id);

        Ok(Score {
            id,
            student_name: score.student_name,
            score: score.score,
            total_questions: score.total_questions,
            created_at: Utc::now(),
        })
    }

    async fn delete_score(&self, _id: i32) -> Result<bool> {
        Ok(false)
    }

    async fn clear_scores(&self) -> Result<()> {
        Ok(())
    }

    async fn initialize_default_questions(&self) {}
}
