use sqlx::Result as SqlxResult;
use uuid::Uuid;

use crate::{db::Db, models::CommentRow};

const COMMENT_COLUMNS: &str = "id, post_id, author_id, body, created_at";

#[derive(Clone)]
pub struct CommentRepo {
    db: Db,
}

impl CommentRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: Uuid) -> SqlxResult<Option<CommentRow>> {
        sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
    }

    pub async fn list_by_post(&self, post_id: Uuid) -> SqlxResult<Vec<CommentRow>> {
        sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE post_id = $1 ORDER BY created_at"
        ))
        .bind(post_id)
        .fetch_all(&self.db)
        .await
    }

    pub async fn create(&self, post_id: Uuid, author_id: Uuid, body: &str) -> SqlxResult<CommentRow> {
        sqlx::query_as::<_, CommentRow>(&format!(
            r#"
            INSERT INTO comments (post_id, author_id, body)
            VALUES ($1, $2, $3)
            RETURNING {COMMENT_COLUMNS}
            "#
        ))
        .bind(post_id)
        .bind(author_id)
        .bind(body)
        .fetch_one(&self.db)
        .await
    }

    pub async fn delete(&self, id: Uuid) -> SqlxResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
