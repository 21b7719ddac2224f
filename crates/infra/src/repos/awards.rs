use sqlx::Result as SqlxResult;
use uuid::Uuid;

use crate::{db::Db, models::AwardRow};

const AWARD_COLUMNS: &str = "id, title, recipient, year, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct CreateAward {
    pub title: String,
    pub recipient: String,
    pub year: i32,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateAward {
    pub title: Option<String>,
    pub recipient: Option<String>,
    pub year: Option<i32>,
}

#[derive(Clone)]
pub struct AwardRepo {
    db: Db,
}

impl AwardRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> SqlxResult<Vec<AwardRow>> {
        sqlx::query_as::<_, AwardRow>(&format!(
            "SELECT {AWARD_COLUMNS} FROM awards ORDER BY year DESC, title"
        ))
        .fetch_all(&self.db)
        .await
    }

    pub async fn create(&self, data: CreateAward) -> SqlxResult<AwardRow> {
        sqlx::query_as::<_, AwardRow>(&format!(
            r#"
            INSERT INTO awards (title, recipient, year)
            VALUES ($1, $2, $3)
            RETURNING {AWARD_COLUMNS}
            "#
        ))
        .bind(&data.title)
        .bind(&data.recipient)
        .bind(data.year)
        .fetch_one(&self.db)
        .await
    }

    pub async fn update(&self, id: Uuid, data: UpdateAward) -> SqlxResult<Option<AwardRow>> {
        sqlx::query_as::<_, AwardRow>(&format!(
            r#"
            UPDATE awards
            SET title = COALESCE($2, title),
                recipient = COALESCE($3, recipient),
                year = COALESCE($4, year),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {AWARD_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&data.title)
        .bind(&data.recipient)
        .bind(data.year)
        .fetch_optional(&self.db)
        .await
    }

    pub async fn delete(&self, id: Uuid) -> SqlxResult<bool> {
        let result = sqlx::query("DELETE FROM awards WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
