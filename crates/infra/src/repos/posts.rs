use sqlx::Result as SqlxResult;
use uuid::Uuid;

use crate::{db::Db, models::PostRow, pagination::LimitOffset};

const POST_COLUMNS: &str = "id, author_id, title, body, created_at, updated_at";

#[derive(Debug, Clone, Default)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub body: Option<String>,
}

#[derive(Clone)]
pub struct PostRepo {
    db: Db,
}

impl PostRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: Uuid) -> SqlxResult<Option<PostRow>> {
        sqlx::query_as::<_, PostRow>(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.db)
            .await
    }

    pub async fn list(&self, page: Option<LimitOffset>) -> SqlxResult<Vec<PostRow>> {
        let p = page.unwrap_or_default();

        sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(p.limit)
        .bind(p.offset)
        .fetch_all(&self.db)
        .await
    }

    pub async fn create(&self, author_id: Uuid, title: &str, body: &str) -> SqlxResult<PostRow> {
        sqlx::query_as::<_, PostRow>(&format!(
            r#"
            INSERT INTO posts (author_id, title, body)
            VALUES ($1, $2, $3)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(author_id)
        .bind(title)
        .bind(body)
        .fetch_one(&self.db)
        .await
    }

    pub async fn update(&self, id: Uuid, data: UpdatePost) -> SqlxResult<Option<PostRow>> {
        sqlx::query_as::<_, PostRow>(&format!(
            r#"
            UPDATE posts
            SET title = COALESCE($2, title),
                body = COALESCE($3, body),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&data.title)
        .bind(&data.body)
        .fetch_optional(&self.db)
        .await
    }

    pub async fn delete(&self, id: Uuid) -> SqlxResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
