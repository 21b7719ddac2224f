use sqlx::Result as SqlxResult;
use uuid::Uuid;

use crate::{db::Db, models::QuestionRow, pagination::LimitOffset};

const QUESTION_COLUMNS: &str = "id, author_id, title, body, answer, answered_at, created_at";

#[derive(Clone)]
pub struct QuestionRepo {
    db: Db,
}

impl QuestionRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: Uuid) -> SqlxResult<Option<QuestionRow>> {
        sqlx::query_as::<_, QuestionRow>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
    }

    pub async fn create(&self, author_id: Uuid, title: &str, body: &str) -> SqlxResult<QuestionRow> {
        sqlx::query_as::<_, QuestionRow>(&format!(
            r#"
            INSERT INTO questions (author_id, title, body)
            VALUES ($1, $2, $3)
            RETURNING {QUESTION_COLUMNS}
            "#
        ))
        .bind(author_id)
        .bind(title)
        .bind(body)
        .fetch_one(&self.db)
        .await
    }

    pub async fn list_by_author(&self, author_id: Uuid) -> SqlxResult<Vec<QuestionRow>> {
        sqlx::query_as::<_, QuestionRow>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE author_id = $1 ORDER BY created_at DESC"
        ))
        .bind(author_id)
        .fetch_all(&self.db)
        .await
    }

    pub async fn list(&self, page: Option<LimitOffset>) -> SqlxResult<Vec<QuestionRow>> {
        let p = page.unwrap_or_default();

        sqlx::query_as::<_, QuestionRow>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(p.limit)
        .bind(p.offset)
        .fetch_all(&self.db)
        .await
    }

    pub async fn answer(&self, id: Uuid, answer: &str) -> SqlxResult<Option<QuestionRow>> {
        sqlx::query_as::<_, QuestionRow>(&format!(
            r#"
            UPDATE questions
            SET answer = $2, answered_at = NOW()
            WHERE id = $1
            RETURNING {QUESTION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(answer)
        .fetch_optional(&self.db)
        .await
    }
}
