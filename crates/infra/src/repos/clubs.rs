use sqlx::Result as SqlxResult;
use uuid::Uuid;

use crate::{db::Db, models::ClubRow, pagination::LimitOffset};

#[derive(Debug, Clone)]
pub struct CreateClub {
    pub name: String,
    pub city: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct ClubRepo {
    db: Db,
}

impl ClubRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: Uuid) -> SqlxResult<Option<ClubRow>> {
        sqlx::query_as::<_, ClubRow>(
            "SELECT id, name, city, description, created_at, updated_at FROM clubs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
    }

    pub async fn list(&self, page: Option<LimitOffset>) -> SqlxResult<Vec<ClubRow>> {
        let p = page.unwrap_or_default();

        sqlx::query_as::<_, ClubRow>(
            "SELECT id, name, city, description, created_at, updated_at FROM clubs ORDER BY name LIMIT $1 OFFSET $2",
        )
        .bind(p.limit)
        .bind(p.offset)
        .fetch_all(&self.db)
        .await
    }

    pub async fn create(&self, data: CreateClub) -> SqlxResult<ClubRow> {
        sqlx::query_as::<_, ClubRow>(
            r#"
            INSERT INTO clubs (name, city, description)
            VALUES ($1, $2, $3)
            RETURNING id, name, city, description, created_at, updated_at
            "#,
        )
        .bind(&data.name)
        .bind(&data.city)
        .bind(&data.description)
        .fetch_one(&self.db)
        .await
    }
}
