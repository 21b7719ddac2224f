use sqlx::Result as SqlxResult;
use uuid::Uuid;

use crate::{db::Db, models::UserRow, pagination::LimitOffset};

const USER_COLUMNS: &str = "id, email, name, phone, gender, birth, rating, address, level, oauth_provider, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub name: String,
    pub oauth_provider: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub birth: Option<chrono::NaiveDate>,
    pub rating: Option<i32>,
    pub address: Option<String>,
}

#[derive(Clone)]
pub struct UserRepo {
    db: Db,
}

impl UserRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, id: Uuid) -> SqlxResult<Option<UserRow>> {
        sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
    }

    pub async fn get_by_email(&self, email: &str) -> SqlxResult<Option<UserRow>> {
        sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await
    }

    pub async fn list(&self, page: Option<LimitOffset>) -> SqlxResult<Vec<UserRow>> {
        let p = page.unwrap_or_default();

        sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(p.limit)
        .bind(p.offset)
        .fetch_all(&self.db)
        .await
    }

    /// Create a user on first social-login completion. New members start at
    /// level 1.
    pub async fn create(&self, data: CreateUser) -> SqlxResult<UserRow> {
        sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (email, name, oauth_provider, level)
            VALUES ($1, $2, $3, 1)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&data.email)
        .bind(&data.name)
        .bind(&data.oauth_provider)
        .fetch_one(&self.db)
        .await
    }

    pub async fn update_profile(
        &self,
        id: Uuid,
        data: UpdateProfile,
    ) -> SqlxResult<Option<UserRow>> {
        sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                gender = COALESCE($4, gender),
                birth = COALESCE($5, birth),
                rating = COALESCE($6, rating),
                address = COALESCE($7, address),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&data.name)
        .bind(&data.phone)
        .bind(&data.gender)
        .bind(data.birth)
        .bind(data.rating)
        .bind(&data.address)
        .fetch_optional(&self.db)
        .await
    }

    pub async fn set_level(&self, id: Uuid, level: i16) -> SqlxResult<Option<UserRow>> {
        sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET level = $2, updated_at = NOW() WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(level)
        .fetch_optional(&self.db)
        .await
    }

    pub async fn delete(&self, id: Uuid) -> SqlxResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
