use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{require_level, AuthSession, Level};
use crate::error::AppError;
use crate::state::AppState;
use infra::repos::{AssetRepo, CreateAsset};

#[derive(Deserialize)]
pub struct CreateAssetBody {
    pub url: String,
    pub filename: String,
    pub content_type: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Json(body): Json<CreateAssetBody>,
) -> Result<impl IntoResponse, AppError> {
    let user = require_level(&state, &claims, Level::Member).await?;

    url::Url::parse(&body.url)
        .map_err(|e| AppError::Validation(format!("invalid asset url: {}", e)))?;

    if body.filename.trim().is_empty() {
        return Err(AppError::Validation("filename is required".to_string()));
    }

    let asset = AssetRepo::new(state.db.clone())
        .create(CreateAsset {
            url: body.url,
            filename: body.filename,
            content_type: body.content_type,
            uploaded_by: user.id,
        })
        .await?;

    Ok(Json(asset))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let asset = AssetRepo::new(state.db.clone())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("asset not found".to_string()))?;

    Ok(Json(asset))
}
