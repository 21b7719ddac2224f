use sqlx::Result as SqlxResult;
use uuid::Uuid;

use crate::{db::Db, models::AssetRow};

const ASSET_COLUMNS: &str = "id, url, filename, content_type, uploaded_by, created_at";

#[derive(Debug, Clone)]
pub struct CreateAsset {
    pub url: String,
    pub filename: String,
    pub content_type: Option<String>,
    pub uploaded_by: Uuid,
}

#[derive(Clone)]
pub struct AssetRepo {
    db: Db,
}

impl AssetRepo {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: Uuid) -> SqlxResult<Option<AssetRow>> {
        sqlx::query_as::<_, AssetRow>(&format!(
            "SELECT {ASSET_COLUMNS} FROM assets WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
    }

    pub async fn create(&self, data: CreateAsset) -> SqlxResult<AssetRow> {
        sqlx::query_as::<_, AssetRow>(&format!(
            r#"
            INSERT INTO assets (url, filename, content_type, uploaded_by)
            VALUES ($1, $2, $3, $4)
            RETURNING {ASSET_COLUMNS}
            "#
        ))
        .bind(&data.url)
        .bind(&data.filename)
        .bind(&data.content_type)
        .bind(data.uploaded_by)
        .fetch_one(&self.db)
        .await
    }
}
