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
use infra::repos::{AwardRepo, CreateAward, UpdateAward};

#[derive(Deserialize)]
pub struct CreateAwardBody {
    pub title: String,
    pub recipient: String,
    pub year: i32,
}

pub async fn create(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Json(body): Json<CreateAwardBody>,
) -> Result<impl IntoResponse, AppError> {
    require_level(&state, &claims, Level::Advanced).await?;

    if body.title.trim().is_empty() || body.recipient.trim().is_empty() {
        return Err(AppError::Validation(
            "title and recipient are required".to_string(),
        ));
    }

    let award = AwardRepo::new(state.db.clone())
        .create(CreateAward {
            title: body.title,
            recipient: body.recipient,
            year: body.year,
        })
        .await?;

    Ok(Json(award))
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let awards = AwardRepo::new(state.db.clone()).list().await?;
    Ok(Json(awards))
}

#[derive(Deserialize)]
pub struct UpdateAwardBody {
    pub title: Option<String>,
    pub recipient: Option<String>,
    pub year: Option<i32>,
}

pub async fn update(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateAwardBody>,
) -> Result<impl IntoResponse, AppError> {
    require_level(&state, &claims, Level::Advanced).await?;

    let updated = AwardRepo::new(state.db.clone())
        .update(
            id,
            UpdateAward {
                title: body.title,
                recipient: body.recipient,
                year: body.year,
            },
        )
        .await?
        .ok_or_else(|| AppError::NotFound("award not found".to_string()))?;

    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<AppState>,
    AuthSession(claims): AuthSession,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    require_level(&state, &claims, Level::Admin).await?;

    let deleted = AwardRepo::new(state.db.clone()).delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound("award not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "success": true })))
}
